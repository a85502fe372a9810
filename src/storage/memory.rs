//! In-process storage backend.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::traits::{OptionStorage, StorageError};

/// Storage backend keeping blobs in memory.
///
/// Used by tests and by callers embedding the token store in a process that
/// manages persistence itself.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a backend with an existing blob
    pub fn with_value(key: impl Into<String>, blob: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.values.lock().insert(key.into(), blob.into());
        storage
    }
}

impl OptionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        self.values.lock().insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
