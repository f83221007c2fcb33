//! `list`: post names, most recent first.

use anyhow::Result;

use crate::log;
use crate::session::Session;
use crate::source::PostSource;

pub fn list_posts<S: PostSource>(session: &Session<S>, refresh: bool) -> Result<()> {
    if refresh {
        session.refresh();
    }

    let names = session.list_files();
    if names.is_empty() {
        log!("list"; "no posts found");
        return Ok(());
    }

    for name in &names {
        println!("{name}");
    }
    Ok(())
}
