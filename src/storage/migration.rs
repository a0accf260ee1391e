//! One-time migration of store data out of the legacy plaintext storage.
//!
//! Older app versions kept each store's snapshot in an unencrypted backend.
//! On first hydrate with an empty secure store, the legacy snapshot is adopted
//! and written to the secure store; the legacy key is removed only after a
//! delay, so the old copy remains as a fallback until the new write has landed.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;

use super::kv::KeyValueStore;
use super::snapshot::read_snapshot;

/// Default delay between adopting legacy data and deleting the legacy key
pub const DEFAULT_CLEANUP_DELAY: Duration = Duration::from_secs(1);

/// Read the legacy snapshot under `key`.
///
/// Read errors and unparseable content are logged and reported as absent.
pub async fn read_legacy<T: DeserializeOwned>(legacy: &dyn KeyValueStore, key: &str) -> Option<T> {
    match read_snapshot(legacy, key).await {
        Ok(Some(state)) => {
            log::info!("Migration: found legacy data under {}", key);
            Some(state)
        }
        Ok(None) => None,
        Err(e) => {
            log::warn!("Migration: ignoring unreadable legacy data under {}: {}", key, e);
            None
        }
    }
}

/// Remove the legacy `key` after `delay` on a detached task.
pub fn schedule_legacy_cleanup(
    legacy: Arc<dyn KeyValueStore>,
    key: &'static str,
    delay: Duration,
) -> Option<JoinHandle<()>> {
    let runtime = match tokio::runtime::Handle::try_current() {
        Ok(runtime) => runtime,
        Err(_) => {
            log::warn!("Migration: no async runtime, legacy key {} left in place", key);
            return None;
        }
    };

    Some(runtime.spawn(async move {
        tokio::time::sleep(delay).await;
        match legacy.remove(key).await {
            Ok(()) => log::info!("Migration: removed legacy key {}", key),
            Err(e) => log::error!("Migration: failed to remove legacy key {}: {}", key, e),
        }
    }))
}
