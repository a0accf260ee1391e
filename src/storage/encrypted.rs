//! Encrypting wrapper around any key-value backend

use std::sync::Arc;

use async_trait::async_trait;

use super::file_storage::Result;
use super::kv::KeyValueStore;
use crate::encryption::{open, seal, DeviceKey};

/// Seals every value in a ChaCha20-Poly1305 container before handing it to
/// the inner backend. Keys are stored as-is.
pub struct EncryptedKeyValueStore {
    inner: Arc<dyn KeyValueStore>,
    key: DeviceKey,
}

impl EncryptedKeyValueStore {
    pub fn new(inner: Arc<dyn KeyValueStore>, key: DeviceKey) -> Self {
        Self { inner, key }
    }
}

#[async_trait]
impl KeyValueStore for EncryptedKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.inner.get(key).await? {
            Some(sealed) => Ok(Some(open(&sealed, &self.key)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let sealed = seal(value, &self.key)?;
        self.inner.set(key, &sealed).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await
    }

    fn name(&self) -> &str {
        "encrypted"
    }
}
