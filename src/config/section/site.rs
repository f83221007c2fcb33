//! `[site]` section configuration.
//!
//! Public URLs of the blog the newsletter points back to.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://ben-mini.com"
//! logo = "https://ben-mini.com/assets/images/ben-mini-full.png"
//! logo_alt = "ben-mini logo"
//! asset_prefix = "../assets/images/"
//! asset_base = "https://ben-mini.com/assets/images/"
//! unsubscribe = "https://tally.so/r/w4PVQr"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Site URLs used when building links and rewriting assets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Canonical site base; article URLs are `{url}/{year}/{slug}`.
    pub url: String,

    /// Logo shown at the top of every newsletter.
    pub logo: String,

    /// Alt text of the logo image.
    pub logo_alt: String,

    /// Relative asset prefix used inside posts.
    pub asset_prefix: String,

    /// Absolute replacement for `asset_prefix`.
    pub asset_base: String,

    /// Destination of the footer "Unsubscribe" link.
    pub unsubscribe: String,
}

impl SiteSectionConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");
    pub const LOGO: FieldPath = FieldPath::new("site.logo");
    pub const ASSET_PREFIX: FieldPath = FieldPath::new("site.asset_prefix");
    pub const ASSET_BASE: FieldPath = FieldPath::new("site.asset_base");
    pub const UNSUBSCRIBE: FieldPath = FieldPath::new("site.unsubscribe");

    /// Rewrite every occurrence of the relative asset prefix to the absolute base.
    pub fn absolutize(&self, src: &str) -> String {
        if self.asset_prefix.is_empty() {
            return src.to_string();
        }
        src.replace(&self.asset_prefix, &self.asset_base)
    }

    /// Validate site URLs.
    ///
    /// # Checks
    /// - absolute URLs must parse and use http or https
    /// - `asset_prefix` must not be empty
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, value) in [
            (Self::URL, &self.url),
            (Self::LOGO, &self.logo),
            (Self::ASSET_BASE, &self.asset_base),
            (Self::UNSUBSCRIBE, &self.unsubscribe),
        ] {
            match url::Url::parse(value) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            field,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        field,
                        format!("invalid URL: {}", e),
                        "use format like https://example.com",
                    );
                }
            }
        }

        if self.asset_prefix.is_empty() {
            diag.error_with_hint(
                Self::ASSET_PREFIX,
                "asset prefix must not be empty",
                "e.g.: \"../assets/images/\"",
            );
        }
    }
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            url: "https://ben-mini.com".into(),
            logo: "https://ben-mini.com/assets/images/ben-mini-full.png".into(),
            logo_alt: "ben-mini logo".into(),
            asset_prefix: "../assets/images/".into(),
            asset_base: "https://ben-mini.com/assets/images/".into(),
            unsubscribe: "https://tally.so/r/w4PVQr".into(),
        }
    }
}
