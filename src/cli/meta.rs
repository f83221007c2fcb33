//! `meta`: derived metadata as JSON.

use anyhow::Result;

use super::common::require_document;
use crate::cli::InputArgs;
use crate::session::Session;
use crate::source::PostSource;

pub fn show_meta<S: PostSource>(session: &Session<S>, input: &InputArgs, pretty: bool) -> Result<()> {
    let document = require_document(input, session)?;
    let meta = session.meta(&document, None)?;

    let formatted = if pretty {
        serde_json::to_string_pretty(&meta)?
    } else {
        serde_json::to_string(&meta)?
    };
    println!("{formatted}");
    Ok(())
}
