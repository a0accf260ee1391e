//! Collaborators shared by both stores

use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::storage::migration::DEFAULT_CLEANUP_DELAY;
use crate::storage::{KeyValueStore, MemoryKeyValueStore};

/// Backends and time source handed to each store at construction
#[derive(Clone)]
pub struct StoreContext {
    /// Current store for snapshots (encrypted in production)
    pub secure: Arc<dyn KeyValueStore>,
    /// Plaintext store written by older app versions
    pub legacy: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
    pub legacy_cleanup_delay: Duration,
}

impl StoreContext {
    pub fn new(secure: Arc<dyn KeyValueStore>, legacy: Arc<dyn KeyValueStore>) -> Self {
        Self {
            secure,
            legacy,
            clock: Arc::new(SystemClock),
            legacy_cleanup_delay: DEFAULT_CLEANUP_DELAY,
        }
    }

    /// Context backed by fresh in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryKeyValueStore::new()),
            Arc::new(MemoryKeyValueStore::new()),
        )
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_cleanup_delay(mut self, delay: Duration) -> Self {
        self.legacy_cleanup_delay = delay;
        self
    }
}
