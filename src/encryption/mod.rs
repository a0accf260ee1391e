//! Encryption for locally persisted store snapshots
//!
//! This module provides:
//! - ChaCha20-Poly1305 authenticated encryption
//! - A JSON container format for sealed values
//! - Device key provisioning (key file with OS keyring mirror)

pub mod crypto;
pub mod errors;
pub mod keystore;
pub mod models;

pub use crypto::{decode_key, encode_key, generate_key, open, seal};
pub use errors::{EncryptionError, EncryptionResult};
pub use keystore::load_or_create_key;
pub use models::{DeviceKey, SealedValue, SEAL_MAGIC, SEAL_VERSION};
