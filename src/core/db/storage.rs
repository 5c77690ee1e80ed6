use std::{collections::HashMap, future::Future, sync::Arc};

use thiserror::Error;
use tokio::sync::RwLock;

/// Browsers allow roughly five megabytes of local storage per origin.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing {key:?}: {size} bytes exceeds the {limit} byte limit")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },
    #[cfg(feature = "sqlite")]
    #[error("storage backend failure: {0}")]
    Backend(#[from] sqlx::Error),
}

/// String key-value storage with the semantics of browser local storage.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>>;
    fn set_item(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>>;
    fn remove_item(&self, key: &str) -> impl Future<Output = Result<(), StorageError>>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

/// In-process storage. Clones share the same items, so a test can keep a
/// handle to inspect what the application wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryInner {
                items: HashMap::new(),
                quota: Some(quota),
            })),
        }
    }

    /// Changes the byte limit for subsequent writes; `None` removes it.
    pub async fn set_quota(&self, quota: Option<usize>) {
        self.inner.write().await.quota = quota;
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.read().await.items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        if let Some(limit) = inner.quota {
            let others: usize = inner
                .items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let size = others + key.len() + value.len();
            if size > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size,
                    limit,
                });
            }
        }
        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.write().await.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn quota_counts_every_other_key() {
        let storage = MemoryStorage::with_quota(20);
        storage.set_item("a", "123456789").await.unwrap();
        let err = storage.set_item("b", "1234567890").await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { size: 21, limit: 20, .. }));

        // Overwriting a key does not count its previous value.
        storage.set_item("a", "1234567890123").await.unwrap();
        assert_eq!(storage.get_item("a").await.unwrap().as_deref(), Some("1234567890123"));
    }

    #[tokio::test]
    async fn clones_share_items() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.set_item("k", "v").await.unwrap();
        assert_eq!(handle.get_item("k").await.unwrap().as_deref(), Some("v"));
        handle.remove_item("k").await.unwrap();
        assert!(storage.is_empty().await);
    }
}
