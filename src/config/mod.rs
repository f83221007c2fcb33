//! Newsletter configuration management for `tidings.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── source     # [source]
//! │   ├── site       # [site]
//! │   ├── theme      # [theme]
//! │   └── preview    # [preview]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # NewsletterConfig (this file)
//! ```
//!
//! The config file is optional. Every field has a built-in default, so a
//! missing `tidings.toml` formats posts for the default blog.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{PreviewConfig, SiteSectionConfig, SourceConfig, ThemeSectionConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing tidings.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsletterConfig {
    /// Path of the loaded config file, empty when running on defaults
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Hosted post repository
    #[serde(default)]
    pub source: SourceConfig,

    /// Site URLs
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Inlined email styling
    #[serde(default)]
    pub theme: ThemeSectionConfig,

    /// Preview server settings
    #[serde(default)]
    pub preview: PreviewConfig,
}

impl NewsletterConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file; falls back to defaults
    /// when none exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self::default()
            }
        };

        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        if let Commands::Preview {
            interface, port, ..
        } = &cli.command
        {
            Self::update_option(&mut self.preview.interface, interface.as_ref());
            Self::update_option(&mut self.preview.port, port.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, collecting all errors before failing.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.source.validate(&mut diag);
        self.site.validate(&mut diag);
        self.theme.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> NewsletterConfig {
    let (parsed, ignored) = NewsletterConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_invalid_toml() {
        let result = NewsletterConfig::parse_with_ignored("[theme\naccent = \"#000\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = NewsletterConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_reports_all_sections() {
        let config = test_parse_config("[source]\nrepo = \"x\"\n[site]\nurl = \"nope\"");
        let err = config.validate().unwrap_err();
        let rendered = format!("{err}");
        assert!(rendered.contains("source.repo"));
        assert!(rendered.contains("site.url"));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[theme]\naccent = \"#000000\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = NewsletterConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.theme.accent, "#000000");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tidings.toml");
        fs::write(&path, "[source]\nbranch = \"main\"\n").unwrap();

        let config = NewsletterConfig::from_path(&path).unwrap();
        assert_eq!(config.source.branch, "main");
        assert_eq!(config.source.repo, "ben-mini/ben-mini.github.io");
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = NewsletterConfig::from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_preview_cli_overrides() {
        let cli = Cli::parse_from(["tidings", "preview", "post.md", "--port", "9000"]);
        let mut config = NewsletterConfig::default();
        config.apply_command_options(&cli);

        assert_eq!(config.preview.port, 9000);
        assert_eq!(
            config.preview.interface,
            IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
        );
    }
}
