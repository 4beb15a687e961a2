//! Configuration loading and management
//!
//! Handles parsing of the optional `tbx.toml` in the data directory.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::task::SortMode;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Sort mode applied when the store has never chosen one
    #[serde(default)]
    pub default_sort: SortMode,

    /// Autosave timing
    #[serde(default)]
    pub autosave: AutosaveConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_sort: SortMode::default(),
            autosave: AutosaveConfig::default(),
        }
    }
}

/// Autosave-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Quiet seconds before a note autosave fires
    #[serde(default = "default_note_debounce_secs")]
    pub note_debounce_secs: u64,

    /// Seconds between periodic full-store saves
    #[serde(default = "default_store_interval_secs")]
    pub store_interval_secs: u64,
}

fn default_note_debounce_secs() -> u64 {
    2
}

fn default_store_interval_secs() -> u64 {
    30
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            note_debounce_secs: default_note_debounce_secs(),
            store_interval_secs: default_store_interval_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a file; an absent file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
