//! Configuration file support for Flashdeck.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/flashdeck/config.toml`.
//! Everything is optional; startup flags override config values.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
}

/// Deck file defaults
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// Deck file to import when the session starts
    #[serde(default)]
    pub import_on_start: Option<PathBuf>,

    /// Deck file to export when the session ends cleanly
    #[serde(default)]
    pub export_on_exit: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_default();
            PathBuf::from(home).join(".config")
        });
        base.join("flashdeck").join("config.toml")
    }
}
