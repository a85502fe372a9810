// Custom tokens: named text substitutions rendered from [NAME] shortcodes,
// with JSON/CSV import and export.

// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod commands;
pub mod events;
pub mod storage;
pub mod tokens;
pub mod transfer;
pub mod util;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

use commands::TokenService;
use storage::FileStorage;
use tokens::TokenStore;
use util::TokensConfig;

/// Concrete service type used by the command-line front end
pub type FileTokenService = TokenService<FileStorage>;

/// Build a file-backed service from settings.
pub fn open_service(config: &TokensConfig) -> FileTokenService {
    let backend = FileStorage::new(config.data_dir.clone());
    let service = TokenService::new(TokenStore::with_option_name(
        backend,
        config.option_name.clone(),
    ));
    info!(
        "Opened token store '{}' in {:?}",
        service.store().option_name(),
        config.data_dir
    );
    service
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
