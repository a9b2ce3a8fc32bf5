//! Configuration system for treequill.
//!
//! Settings are read from a TOML file and every field has a default, so a
//! missing or partial file is fine.
//!
//! # Example
//!
//! ```
//! use treequill::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.history_limit, 10);
//! assert_eq!(config.indent_size, 2);
//!
//! let custom = Config {
//!     history_limit: 25,
//!     ..Config::default()
//! };
//! assert_eq!(custom.history_limit, 25);
//! ```

use crate::file::saver::SaveOptions;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration for the treequill application.
///
/// # Fields
///
/// * `history_limit` - Number of undo snapshots kept (default: 10)
/// * `indent_size` - Spaces per indentation level when saving (default: 2)
/// * `create_backup` - Copy the stored file to `.bak` before each save (default: false)
/// * `store_path` - Where the document is kept (default: platform data dir)
/// * `prompt` - Prompt printed by the interactive shell (default: "> ")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of undo snapshots to keep
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Number of spaces per indentation level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,

    /// Document file; `None` means the default location
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Interactive prompt
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_history_limit() -> usize {
    crate::editor::history::DEFAULT_HISTORY_LIMIT
}

fn default_indent_size() -> usize {
    2
}

fn default_prompt() -> String {
    "> ".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            indent_size: default_indent_size(),
            create_backup: false,
            store_path: None,
            prompt: default_prompt(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/treequill/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("treequill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                warn!("ignoring config file: {:#}", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Loads configuration from a specific file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// The document file to use: the configured one, else
    /// `<data dir>/treequill/document.json`, else `document.json`.
    pub fn resolved_store_path(&self) -> PathBuf {
        if let Some(path) = &self.store_path {
            return path.clone();
        }
        match dirs::data_dir() {
            Some(mut path) => {
                path.push("treequill");
                path.push("document.json");
                path
            }
            None => PathBuf::from("document.json"),
        }
    }

    /// Save settings derived from this configuration.
    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            indent_size: self.indent_size,
            create_backup: self.create_backup,
        }
    }
}
