//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use sl_core::ParseMode;

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<user> <sessions> <total_seconds>` lines.
    #[default]
    Text,
    /// One JSON array per file.
    Json,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Reject a whole file on its first malformed line.
    pub strict: bool,
    /// Output format for reports.
    pub format: OutputFormat,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SL_*)
        figment = figment.merge(Env::prefixed("SL_"));

        figment.extract()
    }

    pub const fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}

/// Returns the platform-specific config directory.
///
/// On Linux: `~/.config/session-ledger`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("session-ledger"))
}
