//! Read-only access to hosted Markdown posts.
//!
//! - [`PostSource`] - list and fetch posts
//! - [`GitHubSource`] - GitHub contents API + raw content host
//! - [`ListingCache`] - session-scoped listing cache

mod cache;
mod github;

pub use cache::{CacheKey, ListingCache};
pub use github::GitHubSource;

use thiserror::Error;

/// Errors from the post store.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected listing from {url}")]
    Listing {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A collection of Markdown posts.
pub trait PostSource {
    /// Identity of the listing, used as the cache key.
    fn key(&self) -> CacheKey;

    /// Post names, most recent first.
    fn list_posts(&self) -> Result<Vec<String>, SourceError>;

    /// Raw text of one post.
    fn fetch_post(&self, name: &str) -> Result<String, SourceError>;
}

/// Keep names ending with `extension` and reverse the listing order.
///
/// Post names start with their date, and listings are sorted by name, so the
/// reversed listing is most-recent-first.
pub fn select_posts<I>(names: I, extension: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
    I::IntoIter: DoubleEndedIterator,
{
    names
        .into_iter()
        .rev()
        .filter(|name| name.ends_with(extension))
        .collect()
}
