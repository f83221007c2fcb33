//! Local preview server.
//!
//! Serves the rendered email so it can be checked in a browser, copied from
//! the page source, or downloaded as `newsletter.html`. Requests are handled
//! one at a time on the calling thread.

mod lifecycle;
mod response;
mod route;

pub use route::Route;

use anyhow::Result;
use tiny_http::Request;

use crate::compiler::RenderError;
use crate::session::Session;
use crate::source::PostSource;
use crate::{debug, log};

/// Preview state: the session plus the currently selected document.
pub struct Preview<'a, S> {
    session: &'a Session<S>,
    document: Option<String>,
    override_url: Option<String>,
}

impl<'a, S: PostSource> Preview<'a, S> {
    pub fn new(session: &'a Session<S>, document: Option<String>, override_url: Option<String>) -> Self {
        Self {
            session,
            document,
            override_url,
        }
    }

    /// Bind and serve until the process is stopped.
    pub fn run(mut self) -> Result<()> {
        let config = &self.session.config().preview;
        let (server, addr) = lifecycle::bind_with_retry(config.interface, config.port)?;
        log!("preview"; "http://{}", addr);

        for request in server.incoming_requests() {
            if let Err(e) = self.handle_request(request) {
                log!("preview"; "request error: {e}");
            }
        }
        Ok(())
    }

    /// Handle a single HTTP request
    fn handle_request(&mut self, request: Request) -> Result<()> {
        let route = Route::parse(request.url());
        debug!("preview"; "{} {} -> {:?}", request.method(), request.url(), route);

        match route {
            Route::Index { override_url } => {
                if override_url.is_some() {
                    self.override_url = override_url;
                }
                if self.document.is_some() {
                    self.respond_rendered(request, false)
                } else {
                    response::respond_posts(request, &self.session.list_files())
                }
            }
            Route::Download => self.respond_rendered(request, true),
            Route::Posts => response::respond_posts(request, &self.session.list_files()),
            Route::Post(name) => {
                // A newly selected post starts from its computed article URL.
                self.document = Some(self.session.fetch_content(&name));
                self.override_url = None;
                self.respond_rendered(request, false)
            }
            Route::Refresh => {
                self.session.refresh();
                response::respond_redirect(request, "/posts")
            }
            Route::NotFound => response::respond_not_found(request),
        }
    }

    fn respond_rendered(&self, request: Request, download: bool) -> Result<()> {
        let document = self.document.as_deref().unwrap_or_default();

        match self.session.render(document, self.override_url.as_deref()) {
            Ok(rendered) if download => response::respond_download(request, rendered.html),
            Ok(rendered) => response::respond_html(request, rendered.html),
            Err(RenderError::EmptyContent) => response::respond_error(
                request,
                422,
                "Please provide Markdown content: open a post from the list or pass a file.",
            ),
            Err(e) => response::respond_error(request, 422, &e.to_string()),
        }
    }
}
