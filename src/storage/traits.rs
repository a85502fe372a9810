//! Storage backend trait for option blobs.
//!
//! A backend is a flat key/value store of opaque strings. The token store
//! keeps its entire mapping under one key and always replaces the whole value,
//! so backends only need atomic single-value writes.

/// Error types for storage backends
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    /// Failed to read a value
    #[error("Failed to read '{key}': {message}")]
    Read { key: String, message: String },
    /// Failed to write a value
    #[error("Failed to write '{key}': {message}")]
    Write { key: String, message: String },
    /// Key cannot be used by this backend
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Backend trait for blob storage.
///
/// Implementations of this trait provide the actual get/set operations.
/// `get` returns `None` when nothing has been stored under the key yet.
pub trait OptionStorage: Send + Sync {
    /// Read the blob stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`.
    fn set(&self, key: &str, blob: &str) -> Result<(), StorageError>;
}

impl<T: OptionStorage + ?Sized> OptionStorage for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        (**self).set(key, blob)
    }
}

#[cfg(test)]
#[path = "traits_test.rs"]
mod tests;
