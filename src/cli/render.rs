//! `render`: the "Generate Email" action.
//!
//! Prints the computed article URL (the editable default), then writes the
//! email to `newsletter.html` or stdout.

use std::path::Path;

use anyhow::Result;

use super::common::{require_document, write_output};
use crate::cli::InputArgs;
use crate::log;
use crate::logger::status_success;
use crate::session::Session;
use crate::source::PostSource;

pub fn render_post<S: PostSource>(
    session: &Session<S>,
    input: &InputArgs,
    override_url: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let document = require_document(input, session)?;

    let meta = session.meta(&document, None)?;
    log!("render"; "article url: {}", meta.article_url);
    if let Some(url) = override_url {
        log!("render"; "article url overridden: {}", url);
    }

    let rendered = session.render(&document, override_url)?;
    write_output(output, &rendered.html)?;

    if let Some(path) = output {
        status_success(&format!("\"{}\" written to {}", rendered.meta.title, path.display()));
    }
    Ok(())
}
