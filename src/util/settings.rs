//! Settings for the token store.
//!
//! Settings are read from a JSON file. Every field has a default, so a missing
//! file or a partial file is fine. The data directory can be overridden with
//! the `CUSTOM_TOKENS_DATA_DIR` environment variable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tokens::DEFAULT_OPTION_NAME;

/// Directory name used under the platform config/data directories
pub const APP_DIR_NAME: &str = "custom-tokens";

/// Default settings file name inside the config directory
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Environment variable overriding `data_dir`
pub const DATA_DIR_ENV: &str = "CUSTOM_TOKENS_DATA_DIR";

/// Error types for loading settings
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Settings file exists but could not be read
    #[error("Failed to read settings file {path}: {message}")]
    Read { path: String, message: String },
    /// Settings file is not valid JSON for TokensConfig
    #[error("Failed to parse settings file {path}: {message}")]
    Parse { path: String, message: String },
    /// No platform directory could be determined
    #[error("Could not determine {0} directory")]
    NoDirectory(&'static str),
}

/// Token store settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TokensConfig {
    /// Directory holding the file-backed store
    pub data_dir: PathBuf,
    /// Storage key for the token mapping
    pub option_name: String,
    /// Log filter used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            option_name: DEFAULT_OPTION_NAME.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl TokensConfig {
    /// Load settings from `path`, or from the default settings file when `None`.
    ///
    /// A missing file yields defaults. The data directory environment
    /// override is applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_settings_path()?,
        };

        let mut config = Self::from_file(&path)?;
        config.apply_env();
        Ok(config)
    }

    /// Read settings from a file without applying environment overrides
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            crate::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        crate::debug!("Loaded settings from {:?}", path);
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
    }
}

/// `<config_dir>/custom-tokens/settings.json`
pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_SETTINGS_FILE))
        .ok_or(ConfigError::NoDirectory("config"))
}

/// `<data_dir>/custom-tokens`, falling back to a relative directory
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(APP_DIR_NAME))
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
