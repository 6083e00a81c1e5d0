//! In-Memory Key-Value Store Adapter
//!
//! Keeps values in memory. Useful for testing and development; a quota
//! and an "unavailable" switch let tests exercise the failure paths that a
//! real store hits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{KeyValueStore, StorageError};

/// In-memory key-value store
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    values: Arc<RwLock<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryKeyValueStore {
    /// Create a new in-memory store without a quota
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects values larger than `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota_bytes: Some(bytes),
            ..Self::default()
        }
    }

    /// Make every operation fail with `StorageError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Store a raw value, bypassing quota and availability checks
    pub async fn seed(&self, key: &str, value: &str) {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.values.write().await.clear();
    }

    /// Get the number of stored keys
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Returns true if nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "in-memory store switched off".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    bytes: value.len(),
                });
            }
        }
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_set_and_get() {
        let store = InMemoryKeyValueStore::new();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_in_memory_get_absent_is_none() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_in_memory_set_replaces() {
        let store = InMemoryKeyValueStore::new();
        store.set("k", "one").await.unwrap();
        store.set("k", "two").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("two".to_string()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_in_memory_remove_is_idempotent() {
        let store = InMemoryKeyValueStore::new();
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_in_memory_quota_rejects_large_values() {
        let store = InMemoryKeyValueStore::with_quota(4);
        store.set("k", "1234").await.unwrap();
        let err = store.set("k", "12345").await.unwrap_err();
        assert_eq!(
            err,
            StorageError::QuotaExceeded {
                key: "k".to_string(),
                bytes: 5
            }
        );
        assert_eq!(store.get("k").await.unwrap(), Some("1234".to_string()));
    }

    #[tokio::test]
    async fn test_in_memory_unavailable_fails_every_operation() {
        let store = InMemoryKeyValueStore::new();
        store.set_unavailable(true);
        assert!(matches!(store.get("k").await, Err(StorageError::Unavailable(_))));
        assert!(matches!(store.set("k", "v").await, Err(StorageError::Unavailable(_))));
        assert!(matches!(store.remove("k").await, Err(StorageError::Unavailable(_))));

        store.set_unavailable(false);
        assert!(store.set("k", "v").await.is_ok());
    }

    #[tokio::test]
    async fn test_in_memory_clones_share_state() {
        let store = InMemoryKeyValueStore::new();
        let other = store.clone();
        store.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap(), Some("v".to_string()));
    }
}
