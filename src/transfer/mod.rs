//! Import/export file formats for the token set.
//!
//! - `json`: `{"tokens": [...], "replace_existing"?: bool}` documents
//! - `csv`: `name,label,value` header plus fully quoted rows

mod csv;
mod json;

use std::path::Path;

pub use self::csv::{export_csv, parse_csv, parse_import_csv, CSV_HEADER};
pub use self::json::{export_json, parse_import_json};

/// Error types for parsing or producing import/export files
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// Payload is not valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    /// Payload has no "tokens" list
    #[error("Invalid import format: expected an object with a \"tokens\" array")]
    MissingTokens,
    /// CSV could not be read
    #[error("Invalid CSV: {0}")]
    Csv(String),
    /// Export could not be produced
    #[error("Failed to encode export: {0}")]
    Encode(String),
}

/// Supported import/export file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferFormat {
    #[default]
    Json,
    Csv,
}

impl TransferFormat {
    /// Pick a format from a file extension; anything but `.csv` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => TransferFormat::Csv,
            _ => TransferFormat::Json,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TransferFormat::Json => "json",
            TransferFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for TransferFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(TransferFormat::Json),
            "csv" => Ok(TransferFormat::Csv),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
