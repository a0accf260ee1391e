//! Sealed value format and the device key

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Marks a stored value as sealed by this crate
pub const SEAL_MAGIC: &str = "MEDFLASH_ENC";

/// Layout version written into every sealed value
pub const SEAL_VERSION: u32 = 1;

/// On-disk form of one sealed key-value entry:
///
/// ```text
/// {"magic":"MEDFLASH_ENC","version":1,"nonce":"<b64>","sealed":"<b64 ciphertext+tag>"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SealedValue {
    pub magic: String,
    pub version: u32,
    /// 96-bit nonce, base64
    pub nonce: String,
    /// Ciphertext with the Poly1305 tag appended, base64
    pub sealed: String,
}

impl SealedValue {
    pub fn new(nonce: String, sealed: String) -> Self {
        Self {
            magic: SEAL_MAGIC.to_string(),
            version: SEAL_VERSION,
            nonce,
            sealed,
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.magic == SEAL_MAGIC
    }
}

/// 256-bit device key, wiped from memory on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DeviceKey([u8; 32]);

impl DeviceKey {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for DeviceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DeviceKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_never_prints_key_bytes() {
        let key = DeviceKey::new([7u8; 32]);
        assert_eq!(format!("{:?}", key), "DeviceKey([REDACTED])");
    }
}
