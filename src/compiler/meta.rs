//! Derived post metadata: title, display date, article URL, header image.

use serde::Serialize;

use super::frontmatter::FrontMatter;
use crate::config::SiteSectionConfig;
use crate::utils::date::{DateParseError, PostDate};

/// Title used when the front matter has none.
pub const UNTITLED: &str = "Untitled";

/// Date display (and sentinel literal) for posts without a date.
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Year segment of the article URL for posts without a date.
const UNKNOWN_YEAR: &str = "unknown";

/// Metadata shown in the newsletter header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMeta {
    pub title: String,
    /// Long-form date, e.g. `March 05, 2024`.
    pub date: String,
    /// "View in Browser" target. Defaults to `{site}/{year}/{slug}`.
    pub article_url: String,
    /// Absolute `header.og_image`. Always empty for flat front matter.
    pub header_image: String,
}

impl PostMeta {
    /// Resolve metadata from front matter.
    ///
    /// A present date that is not `YYYY-MM-DD` is an error; only a missing
    /// date (or the `Unknown Date` literal) falls back.
    pub fn resolve(meta: &FrontMatter, site: &SiteSectionConfig) -> Result<Self, DateParseError> {
        let title = meta.get("title").unwrap_or(UNTITLED).to_string();

        let raw_date = meta.get("date").filter(|d| *d != UNKNOWN_DATE);
        let date = match raw_date {
            Some(raw) => PostDate::parse(raw)?.to_long(),
            None => UNKNOWN_DATE.to_string(),
        };

        let article_url = article_url(site, year_segment(raw_date), &slugify(&title));

        let header_image = site.absolutize(meta.lookup_path("header.og_image").unwrap_or_default());

        Ok(Self {
            title,
            date,
            article_url,
            header_image,
        })
    }

    /// Replace the computed article URL with a caller-supplied one.
    pub fn with_article_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url {
            self.article_url = url.to_string();
        }
        self
    }
}

/// Lowercase the title and turn each space into `-`.
pub fn slugify(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

fn year_segment(raw_date: Option<&str>) -> &str {
    match raw_date {
        Some(raw) => raw.split('-').next().unwrap_or(raw),
        None => UNKNOWN_YEAR,
    }
}

fn article_url(site: &SiteSectionConfig, year: &str, slug: &str) -> String {
    format!("{}/{}/{}", site.url.trim_end_matches('/'), year, slug)
}
