//! Post → newsletter HTML.
//!
//! ```text
//! raw text ─split─▶ (FrontMatter, body)
//!                       │         │
//!                 PostMeta    markdown events ─▶ Fragment ─stylize─▶ HTML
//!                       └──────────────┬────────────────────────┘
//!                                 email template
//! ```
//!
//! Every stage runs on owned data created for one call, so rendering the same
//! text twice yields byte-identical output.

pub mod frontmatter;
pub mod markdown;
pub mod meta;

use thiserror::Error;

use crate::config::NewsletterConfig;
use crate::embed::email::{NEWSLETTER_HTML, NewsletterVars};
use crate::pipeline;
use crate::utils::date::DateParseError;

pub use frontmatter::split;
pub use markdown::MarkdownOptions;
pub use meta::PostMeta;

/// Errors that stop a render.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no markdown content to render")]
    EmptyContent,

    #[error(transparent)]
    Date(#[from] DateParseError),
}

/// Context for one render
pub struct RenderContext<'a> {
    pub config: &'a NewsletterConfig,
    /// Replaces the computed article URL when set.
    pub override_url: Option<&'a str>,
    pub markdown: MarkdownOptions,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a NewsletterConfig) -> Self {
        Self {
            config,
            override_url: None,
            markdown: MarkdownOptions::all(),
        }
    }

    pub fn with_override_url(mut self, url: Option<&'a str>) -> Self {
        self.override_url = url;
        self
    }
}

/// Final email document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub meta: PostMeta,
    pub html: String,
}

/// Split a post and resolve its metadata without rendering the body.
pub fn prepare(document: &str, ctx: &RenderContext<'_>) -> Result<(PostMeta, String), RenderError> {
    if document.trim().is_empty() {
        return Err(RenderError::EmptyContent);
    }

    let (front_matter, body) = split(document);
    let meta = PostMeta::resolve(&front_matter, &ctx.config.site)?.with_article_url(ctx.override_url);
    Ok((meta, body))
}

/// Render a raw post into the newsletter email.
pub fn render(document: &str, ctx: &RenderContext<'_>) -> Result<RenderedDocument, RenderError> {
    let (meta, body) = prepare(document, ctx)?;
    let content = render_content(&body, ctx);
    let html = NEWSLETTER_HTML.render(&NewsletterVars::new(&meta, &content, ctx.config));
    Ok(RenderedDocument { meta, html })
}

/// Markdown body → styled HTML fragment.
pub fn render_content(body: &str, ctx: &RenderContext<'_>) -> String {
    let fragment = markdown::to_fragment(body, &ctx.markdown);
    pipeline::stylize(fragment, ctx.config).to_html()
}
