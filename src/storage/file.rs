//! File-backed storage: one JSON file per key inside a data directory.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::traits::{OptionStorage, StorageError};

/// Storage backend writing each key to `<data_dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `data_dir` (created lazily on first write)
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file holding `key`
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

impl OptionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        crate::debug!("Reading '{}' from {:?}", key, path);

        if !path.exists() {
            crate::debug!("No file for '{}', treating as unset", key);
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StorageError::Read {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    /// Persist using atomic write (temp file + rename)
    fn set(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write_err = |message: String| StorageError::Write {
            key: key.to_string(),
            message,
        };

        crate::debug!("Writing {} bytes for '{}' to {:?}", blob.len(), key, path);

        fs::create_dir_all(&self.data_dir).map_err(|e| write_err(e.to_string()))?;

        let temp_path = path.with_extension("tmp");

        // Write to temp file with explicit sync
        {
            let mut file = File::create(&temp_path)
                .map_err(|e| write_err(format!("Failed to create temp file: {}", e)))?;
            file.write_all(blob.as_bytes())
                .map_err(|e| write_err(format!("Failed to write: {}", e)))?;
            file.sync_all()
                .map_err(|e| write_err(format!("Failed to sync: {}", e)))?;
        }

        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_err(format!("Failed to rename: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
