//! Snapshot reads and detached snapshot writes

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;

use super::file_storage::Result;
use super::kv::KeyValueStore;

/// Decode a persisted snapshot.
///
/// Older app versions wrapped the snapshot in a `{ "state": ..., "version": n }`
/// envelope; newer ones write it bare. When a top-level `state` key is present
/// only its value is decoded, and a malformed `state` is an error rather than
/// an empty bare snapshot.
pub fn decode_snapshot<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let mut value: Value = serde_json::from_str(raw)?;
    let envelope = value.as_object_mut().and_then(|obj| obj.remove("state"));
    Ok(serde_json::from_value(envelope.unwrap_or(value))?)
}

/// Read and decode the snapshot under `key`
pub async fn read_snapshot<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(decode_snapshot(&raw)?)),
        None => Ok(None),
    }
}

/// Join handles of detached persistence tasks owned by one store
#[derive(Default)]
pub struct PendingTasks {
    handles: Vec<JoinHandle<()>>,
}

impl PendingTasks {
    pub fn push(&mut self, handle: JoinHandle<()>) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait for every outstanding task
    pub async fn flush(&mut self) {
        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                log::error!("Persistence task panicked: {}", e);
            }
        }
    }
}

/// Write `value` under `key` on a detached task. Failures are logged; the
/// caller's in-memory state is unaffected.
pub fn spawn_write(store: Arc<dyn KeyValueStore>, key: &'static str, value: String) -> Option<JoinHandle<()>> {
    let runtime = match tokio::runtime::Handle::try_current() {
        Ok(runtime) => runtime,
        Err(_) => {
            log::error!("No async runtime available, dropping write of {}", key);
            return None;
        }
    };

    Some(runtime.spawn(async move {
        if let Err(e) = store.set(key, &value).await {
            log::error!("Failed to persist {} to {} store: {}", key, store.name(), e);
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        count: u32,
    }

    #[test]
    fn test_decode_bare_and_enveloped() {
        let bare: Sample = decode_snapshot(r#"{"count":3}"#).unwrap();
        assert_eq!(bare, Sample { count: 3 });

        let wrapped: Sample = decode_snapshot(r#"{"state":{"count":4},"version":0}"#).unwrap();
        assert_eq!(wrapped, Sample { count: 4 });

        assert!(decode_snapshot::<Sample>("{not json").is_err());
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Lenient {
        #[serde(default)]
        count: u32,
    }

    #[test]
    fn test_malformed_envelope_state_is_an_error() {
        // every field defaults, so a bare decode of the outer object would succeed
        let raw = r#"{"state":{"count":"many"},"version":0}"#;
        assert!(decode_snapshot::<Lenient>(raw).is_err());

        let raw = r#"{"state":null,"version":0}"#;
        assert!(decode_snapshot::<Lenient>(raw).is_err());

        let ok: Lenient = decode_snapshot(r#"{"state":{},"version":1}"#).unwrap();
        assert_eq!(ok, Lenient::default());
    }

    #[tokio::test]
    async fn test_spawned_write_lands_after_flush() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut pending = PendingTasks::default();

        let handle = spawn_write(store.clone(), "k", "v".to_string()).unwrap();
        pending.push(handle);
        pending.flush().await;

        assert!(pending.is_empty());
        assert_eq!(store.raw("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_spawn_without_runtime_is_dropped() {
        let store = Arc::new(MemoryKeyValueStore::new());
        assert!(spawn_write(store.clone(), "k", "v".to_string()).is_none());
        assert_eq!(store.raw("k"), None);
    }
}
