//! `[source]` section configuration.
//!
//! Where blog posts are read from.
//!
//! # Example
//!
//! ```toml
//! [source]
//! repo = "ben-mini/ben-mini.github.io"   # GitHub owner/name
//! branch = "gh-pages"
//! path = "_posts"
//! extension = ".md"
//! ```

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Bytes escaped in a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Hosted post repository settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    /// Repository in `owner/name` form.
    pub repo: String,

    /// Branch (or any git ref) to read from.
    pub branch: String,

    /// Directory of posts inside the repository.
    pub path: String,

    /// Only file names ending with this suffix are listed.
    pub extension: String,

    /// Base URL of the contents API.
    pub api_base: String,

    /// Base URL serving raw file content.
    pub raw_base: String,
}

impl SourceConfig {
    pub const REPO: FieldPath = FieldPath::new("source.repo");
    pub const BRANCH: FieldPath = FieldPath::new("source.branch");
    pub const API_BASE: FieldPath = FieldPath::new("source.api_base");
    pub const RAW_BASE: FieldPath = FieldPath::new("source.raw_base");

    /// Contents API URL listing the post directory.
    pub fn listing_url(&self) -> String {
        format!(
            "{}/repos/{}/contents/{}?ref={}",
            self.api_base.trim_end_matches('/'),
            self.repo,
            self.path.trim_matches('/'),
            self.branch
        )
    }

    /// Raw content URL of one post. The name is encoded as one path segment.
    pub fn raw_url(&self, name: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base.trim_end_matches('/'),
            self.repo,
            self.branch,
            self.path.trim_matches('/'),
            utf8_percent_encode(name, PATH_SEGMENT)
        )
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let valid_repo = self
            .repo
            .split_once('/')
            .is_some_and(|(owner, name)| {
                !owner.is_empty() && !name.is_empty() && !name.contains('/')
            });
        if !valid_repo {
            diag.error_with_hint(
                Self::REPO,
                format!("`{}` is not an owner/name repository", self.repo),
                "e.g.: \"ben-mini/ben-mini.github.io\"",
            );
        }

        if self.branch.trim().is_empty() {
            diag.error(Self::BRANCH, "branch must not be empty");
        }

        for (field, value) in [(Self::API_BASE, &self.api_base), (Self::RAW_BASE, &self.raw_base)] {
            if let Err(e) = url::Url::parse(value) {
                diag.error(field, format!("invalid URL `{value}`: {e}"));
            }
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            repo: "ben-mini/ben-mini.github.io".into(),
            branch: "gh-pages".into(),
            path: "_posts".into(),
            extension: ".md".into(),
            api_base: "https://api.github.com".into(),
            raw_base: "https://raw.githubusercontent.com".into(),
        }
    }
}
