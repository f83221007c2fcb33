//! `[theme]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [theme]
//! accent = "#4bae34"
//! background = "#e8f6e4"
//! font = "'Arial', sans-serif"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Colors and fonts inlined into the email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeSectionConfig {
    /// Brand color for links, dividers and quote borders.
    pub accent: String,

    /// Page background around the content card.
    pub background: String,

    /// CSS font stack. Email clients rarely load web fonts.
    pub font: String,
}

impl ThemeSectionConfig {
    pub const ACCENT: FieldPath = FieldPath::new("theme.accent");
    pub const BACKGROUND: FieldPath = FieldPath::new("theme.background");
    pub const FONT: FieldPath = FieldPath::new("theme.font");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, value) in [
            (Self::ACCENT, &self.accent),
            (Self::BACKGROUND, &self.background),
            (Self::FONT, &self.font),
        ] {
            if value.trim().is_empty() {
                diag.error(field, "must not be empty");
            } else if value.contains(['<', '>', '"', ';']) {
                diag.error_with_hint(
                    field,
                    format!("`{value}` cannot be inlined into a style attribute"),
                    "remove <, >, \" and ; characters",
                );
            }
        }
    }
}

impl Default for ThemeSectionConfig {
    fn default() -> Self {
        Self {
            accent: "#4bae34".into(),
            background: "#e8f6e4".into(),
            font: "'Arial', sans-serif".into(),
        }
    }
}
