//! Request handlers for one formatting session.
//!
//! Each handler is callable from any shell (CLI command, preview server,
//! tests). Retrieval failures are reported to the user and yield an empty
//! result instead of an error.

use crate::compiler::{self, PostMeta, RenderContext, RenderError, RenderedDocument};
use crate::config::NewsletterConfig;
use crate::logger::status_error;
use crate::source::{ListingCache, PostSource};
use crate::{debug, log};

pub struct Session<S> {
    config: NewsletterConfig,
    source: S,
    cache: ListingCache,
}

impl<S: PostSource> Session<S> {
    pub fn new(config: NewsletterConfig, source: S) -> Self {
        Self {
            config,
            source,
            cache: ListingCache::new(),
        }
    }

    pub fn config(&self) -> &NewsletterConfig {
        &self.config
    }

    /// Post names, most recent first.
    ///
    /// Served from the cache after the first successful listing. A failed
    /// listing is reported, not cached, and yields an empty list.
    pub fn list_files(&self) -> Vec<String> {
        let key = self.source.key();
        if let Some(names) = self.cache.get(&key) {
            debug!("source"; "listing served from cache ({} posts)", names.len());
            return names;
        }

        match self.source.list_posts() {
            Ok(names) => {
                log!("source"; "found {} posts in {}", names.len(), key.repo);
                self.cache.insert(key, names.clone());
                names
            }
            Err(e) => {
                status_error("failed to fetch post list", &format_error(&e));
                Vec::new()
            }
        }
    }

    /// Forget the cached listing so the next `list_files` refetches.
    pub fn refresh(&self) {
        if self.cache.invalidate(&self.source.key()) {
            debug!("source"; "listing cache invalidated");
        }
    }

    /// Raw Markdown of one post, or `""` after reporting a failure.
    pub fn fetch_content(&self, name: &str) -> String {
        match self.source.fetch_post(name) {
            Ok(text) => {
                debug!("source"; "loaded {} ({} bytes)", name, text.len());
                text
            }
            Err(e) => {
                status_error(&format!("failed to fetch content for {name}"), &format_error(&e));
                String::new()
            }
        }
    }

    /// Derived metadata only, for showing the editable article URL.
    pub fn meta(&self, document: &str, override_url: Option<&str>) -> Result<PostMeta, RenderError> {
        let ctx = RenderContext::new(&self.config).with_override_url(override_url);
        compiler::prepare(document, &ctx).map(|(meta, _)| meta)
    }

    /// Render a post into the newsletter email.
    pub fn render(
        &self,
        document: &str,
        override_url: Option<&str>,
    ) -> Result<RenderedDocument, RenderError> {
        let ctx = RenderContext::new(&self.config).with_override_url(override_url);
        compiler::render(document, &ctx)
    }
}

/// Error with its source chain, one cause per line.
fn format_error(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CacheKey, SourceError};
    use std::cell::{Cell, RefCell};

    /// In-memory store counting listing calls.
    #[derive(Default)]
    struct FakeSource {
        names: RefCell<Vec<String>>,
        fail: Cell<bool>,
        list_calls: Cell<usize>,
    }

    impl FakeSource {
        fn with_names(names: &[&str]) -> Self {
            let source = Self::default();
            *source.names.borrow_mut() = names.iter().map(|n| n.to_string()).collect();
            source
        }
    }

    impl PostSource for &FakeSource {
        fn key(&self) -> CacheKey {
            CacheKey::from(&crate::config::SourceConfig::default())
        }

        fn list_posts(&self) -> Result<Vec<String>, SourceError> {
            self.list_calls.set(self.list_calls.get() + 1);
            if self.fail.get() {
                return Err(SourceError::Status {
                    url: "https://api.test/list".into(),
                    status: 403,
                });
            }
            Ok(self.names.borrow().clone())
        }

        fn fetch_post(&self, name: &str) -> Result<String, SourceError> {
            if self.fail.get() || !self.names.borrow().iter().any(|n| n == name) {
                return Err(SourceError::Status {
                    url: format!("https://raw.test/{name}"),
                    status: 404,
                });
            }
            Ok(format!("---\ntitle: {name}\n---\nBody of {name}"))
        }
    }

    fn session(source: &FakeSource) -> Session<&FakeSource> {
        Session::new(NewsletterConfig::default(), source)
    }

    #[test]
    fn test_list_files_cached() {
        let source = FakeSource::with_names(&["b.md", "a.md"]);
        let session = session(&source);

        assert_eq!(session.list_files(), ["b.md", "a.md"]);
        source.names.borrow_mut().push("c.md".into());
        assert_eq!(session.list_files(), ["b.md", "a.md"]);
        assert_eq!(source.list_calls.get(), 1);
    }

    #[test]
    fn test_refresh_refetches() {
        let source = FakeSource::with_names(&["a.md"]);
        let session = session(&source);

        session.list_files();
        source.names.borrow_mut().insert(0, "new.md".into());
        session.refresh();

        assert_eq!(session.list_files(), ["new.md", "a.md"]);
        assert_eq!(source.list_calls.get(), 2);
    }

    #[test]
    fn test_list_failure_not_cached() {
        let source = FakeSource::with_names(&["a.md"]);
        let session = session(&source);

        source.fail.set(true);
        assert!(session.list_files().is_empty());

        source.fail.set(false);
        assert_eq!(session.list_files(), ["a.md"]);
        assert_eq!(source.list_calls.get(), 2);
    }

    #[test]
    fn test_fetch_content() {
        let source = FakeSource::with_names(&["a.md"]);
        let session = session(&source);

        assert!(session.fetch_content("a.md").contains("Body of a.md"));
        assert_eq!(session.fetch_content("missing.md"), "");
    }

    #[test]
    fn test_fetch_then_render() {
        let source = FakeSource::with_names(&["Hello World"]);
        let session = session(&source);

        let text = session.fetch_content("Hello World");
        let meta = session.meta(&text, None).unwrap();
        assert_eq!(meta.article_url, "https://ben-mini.com/unknown/hello-world");

        let doc = session.render(&text, Some("https://ben-mini.com/2024/hi")).unwrap();
        assert!(doc.html.contains("<p>Body of Hello World</p>"));
        assert!(doc.html.contains("href=\"https://ben-mini.com/2024/hi\""));
    }

    #[test]
    fn test_render_empty_after_failed_fetch() {
        let source = FakeSource::with_names(&[]);
        let session = session(&source);

        let text = session.fetch_content("gone.md");
        assert!(matches!(session.render(&text, None), Err(RenderError::EmptyContent)));
    }

    #[test]
    fn test_format_error_chain() {
        let err = std::io::Error::other("inner");
        assert_eq!(format_error(&err), "inner");
    }
}
