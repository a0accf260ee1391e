//! Key-value persistence seam shared by the progress and streak stores

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::file_storage::Result;

/// Asynchronous whole-value key-value storage.
///
/// Values are complete JSON snapshots; there is no partial update. Backends are
/// shared between stores through `Arc<dyn KeyValueStore>`, each store using its
/// own keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Human-readable backend name for logging
    fn name(&self) -> &str;
}

/// In-process backend, used for ephemeral sessions and tests
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous peek at a raw value, bypassing the async interface
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    /// Synchronous seed of a raw value
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.insert_raw(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Backend whose first `n` writes fail, for exercising write-failure paths
#[cfg(test)]
pub(crate) struct FailingWrites {
    pub inner: MemoryKeyValueStore,
    remaining_failures: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl FailingWrites {
    pub fn new(failures: usize) -> Self {
        Self {
            inner: MemoryKeyValueStore::new(),
            remaining_failures: std::sync::atomic::AtomicUsize::new(failures),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl KeyValueStore for FailingWrites {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        use std::sync::atomic::Ordering;

        let failing = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(std::io::Error::other("disk full").into());
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_basic_operations() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("a").await.unwrap(), None);

        store.set("a", "1").await.unwrap();
        store.set("a", "2").await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("2"));

        store.remove("a").await.unwrap();
        store.remove("a").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failing_writes_recover() {
        let store = FailingWrites::new(1);
        assert!(store.set("a", "1").await.is_err());
        assert_eq!(store.get("a").await.unwrap(), None);

        store.set("a", "2").await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("2"));
    }
}
