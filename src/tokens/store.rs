// Token store - loads and saves the whole token mapping as a single blob,
// serving reads from a cache that is refreshed on every write

use std::collections::HashSet;

use parking_lot::Mutex;

use super::types::{fold_name, TokenMap};
use crate::storage::{OptionStorage, StorageError};

/// Storage key used when none is configured
pub const DEFAULT_OPTION_NAME: &str = "custom_tokens_data";

/// Error types for token store operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Backend failed to read or write
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Stored blob is not a token mapping
    #[error("Failed to decode stored tokens: {0}")]
    Corrupt(String),
    /// Mapping could not be encoded
    #[error("Failed to encode tokens: {0}")]
    Encode(String),
}

/// Read-through cache for the last loaded or saved snapshot
#[derive(Debug, Default)]
struct SnapshotCache {
    slot: Mutex<Option<TokenMap>>,
}

impl SnapshotCache {
    fn get(&self) -> Option<TokenMap> {
        self.slot.lock().clone()
    }

    fn put(&self, tokens: TokenMap) {
        *self.slot.lock() = Some(tokens);
    }

    fn invalidate(&self) {
        *self.slot.lock() = None;
    }
}

/// Store owning the canonical token mapping.
///
/// Every write replaces the whole mapping; there are no per-key patches.
pub struct TokenStore<S: OptionStorage> {
    backend: S,
    option_name: String,
    cache: SnapshotCache,
}

impl<S: OptionStorage> TokenStore<S> {
    /// Create a store over `backend` using the default option name
    pub fn new(backend: S) -> Self {
        Self::with_option_name(backend, DEFAULT_OPTION_NAME)
    }

    /// Create a store keeping its mapping under `option_name`
    pub fn with_option_name(backend: S, option_name: impl Into<String>) -> Self {
        Self {
            backend,
            option_name: option_name.into(),
            cache: SnapshotCache::default(),
        }
    }

    pub fn option_name(&self) -> &str {
        &self.option_name
    }

    /// Current snapshot of the mapping.
    ///
    /// An unset option is an empty mapping. Served from cache after the
    /// first successful read or write.
    pub fn load(&self) -> Result<TokenMap, StoreError> {
        if let Some(tokens) = self.cache.get() {
            return Ok(tokens);
        }

        crate::debug!("Loading tokens from option '{}'", self.option_name);
        let tokens = match self.backend.get(&self.option_name)? {
            Some(blob) if !is_unset_blob(&blob) => decode(&blob)?,
            _ => {
                crate::debug!("No stored tokens, starting with empty store");
                TokenMap::new()
            }
        };

        crate::info!("Loaded {} tokens", tokens.len());
        self.cache.put(tokens.clone());
        Ok(tokens)
    }

    /// Persist the whole mapping and refresh the cache.
    ///
    /// If the backend write fails the cache is dropped, so the next load
    /// reflects whatever the backend actually holds.
    pub fn save(&self, tokens: &TokenMap) -> Result<(), StoreError> {
        let blob = serde_json::to_string(tokens).map_err(|e| StoreError::Encode(e.to_string()))?;

        crate::debug!("Persisting {} tokens to option '{}'", tokens.len(), self.option_name);
        if let Err(e) = self.backend.set(&self.option_name, &blob) {
            self.cache.invalidate();
            return Err(e.into());
        }

        self.cache.put(tokens.clone());
        Ok(())
    }

    /// Drop the cached snapshot so the next load reads the backend
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}

/// Blank, `[]` and `null` blobs all mean "no tokens yet"
fn is_unset_blob(blob: &str) -> bool {
    matches!(blob.trim(), "" | "[]" | "null")
}

/// Parse a stored blob; names differing only in case are rejected
fn decode(blob: &str) -> Result<TokenMap, StoreError> {
    let tokens: TokenMap =
        serde_json::from_str(blob).map_err(|e| StoreError::Corrupt(e.to_string()))?;

    let mut seen = HashSet::with_capacity(tokens.len());
    if let Some(name) = tokens.keys().find(|name| !seen.insert(fold_name(name))) {
        return Err(StoreError::Corrupt(format!(
            "token name '{}' collides with another name ignoring case",
            name
        )));
    }
    Ok(tokens)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
