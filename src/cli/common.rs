//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::InputArgs;
use crate::session::Session;
use crate::source::PostSource;

/// Read the Markdown document selected by `--post`, a path, or `-` (stdin).
///
/// Returns `None` when no input was given.
pub fn read_document<S: PostSource>(
    input: &InputArgs,
    session: &Session<S>,
) -> Result<Option<String>> {
    if let Some(name) = &input.post {
        // Failures are reported by the session; an empty text fails to render.
        return Ok(Some(session.fetch_content(name)));
    }

    match &input.input {
        Some(path) if path.as_os_str() == "-" => read_stdin().map(Some),
        Some(path) => read_file(path).map(Some),
        None => Ok(None),
    }
}

/// Like [`read_document`], but input is required.
pub fn require_document<S: PostSource>(input: &InputArgs, session: &Session<S>) -> Result<String> {
    match read_document(input, session)? {
        Some(document) => Ok(document),
        None => bail!("no input: pass a Markdown file, `-` for stdin, or --post NAME"),
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_stdin() -> Result<String> {
    let mut document = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut document)
        .context("failed to read stdin")?;
    Ok(document)
}

/// Write `content` to `path`, or to stdout when `path` is `None`.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NewsletterConfig;
    use crate::source::{CacheKey, SourceError};
    use std::path::PathBuf;

    struct NoSource;

    impl PostSource for NoSource {
        fn key(&self) -> CacheKey {
            CacheKey::from(&crate::config::SourceConfig::default())
        }

        fn list_posts(&self) -> Result<Vec<String>, SourceError> {
            Ok(Vec::new())
        }

        fn fetch_post(&self, name: &str) -> Result<String, SourceError> {
            Ok(format!("# {name}"))
        }
    }

    fn session() -> Session<NoSource> {
        Session::new(NewsletterConfig::default(), NoSource)
    }

    #[test]
    fn test_read_document_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.md");
        fs::write(&path, "# Hi").unwrap();

        let input = InputArgs {
            input: Some(path),
            post: None,
        };
        assert_eq!(read_document(&input, &session()).unwrap().as_deref(), Some("# Hi"));
    }

    #[test]
    fn test_read_document_from_post() {
        let input = InputArgs {
            input: None,
            post: Some("a.md".into()),
        };
        assert_eq!(require_document(&input, &session()).unwrap(), "# a.md");
    }

    #[test]
    fn test_read_document_missing() {
        let input = InputArgs::default();
        assert!(read_document(&input, &session()).unwrap().is_none());
        assert!(require_document(&input, &session()).is_err());

        let input = InputArgs {
            input: Some(PathBuf::from("/definitely/not/here.md")),
            post: None,
        };
        let err = read_document(&input, &session()).unwrap_err();
        assert!(err.to_string().contains("here.md"));
    }

    #[test]
    fn test_write_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        write_output(Some(&path), "<p>x</p>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>x</p>");
    }
}
