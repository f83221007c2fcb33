//! HTTP response handlers.

use anyhow::{Result, anyhow};
use tiny_http::{Header, Request, Response, StatusCode};

use crate::utils::html::escape;
use crate::utils::mime::types::{HTML, PLAIN};

/// File name offered when downloading the email.
pub const DOWNLOAD_NAME: &str = "newsletter.html";

pub fn respond_html(request: Request, body: String) -> Result<()> {
    send_body(request, 200, HTML, body, None)
}

/// Serve the email as an attachment named `newsletter.html`.
pub fn respond_download(request: Request, body: String) -> Result<()> {
    let disposition = format!("attachment; filename=\"{DOWNLOAD_NAME}\"");
    send_body(request, 200, HTML, body, Some(header("Content-Disposition", &disposition)?))
}

/// Post listing with links to each post.
pub fn respond_posts(request: Request, names: &[String]) -> Result<()> {
    let items: String = names
        .iter()
        .map(|name| {
            let href = percent_encoding::utf8_percent_encode(name, percent_encoding::NON_ALPHANUMERIC);
            format!("<li><a href=\"/posts/{href}\">{}</a></li>\n", escape(name))
        })
        .collect();
    let body = format!(
        "<html><body><h1>Posts</h1><p><a href=\"/refresh\">Refresh</a></p>\n<ul>\n{items}</ul></body></html>"
    );
    respond_html(request, body)
}

/// User-facing error page.
pub fn respond_error(request: Request, status: u16, message: &str) -> Result<()> {
    let body = format!(
        "<html><body><h1>Error</h1><pre>{}</pre><p><a href=\"/posts\">Posts</a></p></body></html>",
        escape(message)
    );
    send_body(request, status, HTML, body, None)
}

pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(request, 404, PLAIN, "404 Not Found".to_string(), None)
}

pub fn respond_redirect(request: Request, location: &str) -> Result<()> {
    let response = Response::empty(StatusCode(303)).with_header(header("Location", location)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &str,
    body: String,
    extra: Option<Header>,
) -> Result<()> {
    let mut response = Response::from_string(body)
        .with_status_code(StatusCode(status))
        .with_header(header("Content-Type", content_type)?);
    if let Some(extra) = extra {
        response = response.with_header(extra);
    }
    request.respond(response)?;
    Ok(())
}

fn header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header {key}: {value}"))
}
