//! Shared utilities for custom-tokens.
//!
//! - `settings`: TokensConfig loading with defaults and environment overrides

mod settings;

pub use settings::{
    default_settings_path, ConfigError, TokensConfig, APP_DIR_NAME, DATA_DIR_ENV,
    DEFAULT_SETTINGS_FILE,
};
