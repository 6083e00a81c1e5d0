//! File-based Key-Value Store Adapter
//!
//! Stores each key as one file under a base directory. Writes go to a
//! temporary sibling first and are renamed into place, so a crash never
//! leaves a half-written collection behind.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{KeyValueStore, StorageError};

/// File-based key-value store
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Create a new file store with a base directory
    ///
    /// # Arguments
    /// * `base_path` - The directory holding one file per key
    ///
    /// # Example
    /// ```ignore
    /// let store = FileKeyValueStore::new("./data/local");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a key
    ///
    /// Characters outside `[A-Za-z0-9_.-]` are replaced so any key maps to
    /// a single file inside the base directory.
    fn key_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", file_name))
    }

    /// Get the temporary path used while writing a key
    fn temp_path(&self, key: &str) -> PathBuf {
        self.key_path(key).with_extension("json.tmp")
    }

    /// Ensure the base directory exists
    async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let file_path = self.key_path(key);

        match fs::read_to_string(&file_path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_dir().await?;

        let temp_path = self.temp_path(key);
        let file_path = self.key_path(key);

        fs::write(&temp_path, value)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        fs::rename(&temp_path, &file_path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        tracing::debug!(key, bytes = value.len(), "wrote key to {}", file_path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.key_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e.to_string())),
        }
    }
}
