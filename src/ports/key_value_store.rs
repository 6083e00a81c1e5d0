//! Key-Value Store Port - the local persistence substrate behind drafts.
//!
//! The contract is deliberately small: whole values are read and written
//! per key, with no partial updates. Callers that need a collection store
//! it as one serialized value and rewrite it in full.

use async_trait::async_trait;

/// Errors that can occur during key-value operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded writing '{key}' ({bytes} bytes)")]
    QuotaExceeded { key: String, bytes: usize },

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for a single-writer key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// `None` if nothing is stored under `key`
    ///
    /// # Errors
    /// Returns `StorageError` if the store cannot be read
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns `StorageError` if the write fails; the previous value is
    /// left in place
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
