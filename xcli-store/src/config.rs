//! Configuration management.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use xcli_fetch::API_BASE;

use crate::error::StoreError;
use crate::paths::default_config_path;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Watch defaults.
    #[serde(default)]
    pub watch: WatchConfig,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Defaults for `x watch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Poll interval in seconds when `--interval` is not given.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Tweets requested per poll.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Whether human output uses ANSI colors.
    #[serde(default = "default_true")]
    pub color: bool,
}

/// API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the v2 API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_interval_secs() -> u64 {
    60
}

fn default_page_size() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    API_BASE.to_string()
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            page_size: default_page_size(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Loads configuration from the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&default_config_path())
    }

    /// Loads configuration from a specific path; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.watch.interval_secs == 0 {
            return Err(StoreError::Config("watch.interval_secs must be at least 1".to_string()));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(StoreError::Config("api.base_url must not be empty".to_string()));
        }
        Ok(())
    }
}
