//! `fetch`: raw Markdown of one post, for editing before `render`.

use std::path::Path;

use anyhow::{Result, bail};

use super::common::write_output;
use crate::logger::status_success;
use crate::session::Session;
use crate::source::PostSource;

pub fn fetch_post<S: PostSource>(
    session: &Session<S>,
    name: &str,
    output: Option<&Path>,
) -> Result<()> {
    let text = session.fetch_content(name);
    if text.is_empty() {
        bail!("nothing fetched for {name}");
    }

    write_output(output, &text)?;
    if let Some(path) = output {
        status_success(&format!("loaded {name} into {}", path.display()));
    }
    Ok(())
}
