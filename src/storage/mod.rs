mod encrypted;
mod file_storage;
mod kv;
pub mod migration;
pub mod snapshot;

pub use encrypted::EncryptedKeyValueStore;
pub use file_storage::{FileKeyValueStore, Result, StorageError};
pub use kv::{KeyValueStore, MemoryKeyValueStore};

#[cfg(test)]
pub(crate) use kv::FailingWrites;
