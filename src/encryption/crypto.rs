//! Cryptographic operations for sealing stored values

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use rand::RngCore;

use super::errors::{EncryptionError, EncryptionResult};
use super::models::{DeviceKey, SealedValue, SEAL_VERSION};

/// Nonce size in bytes for ChaCha20-Poly1305
const NONCE_SIZE: usize = 12;

/// Generate a fresh random device key
pub fn generate_key() -> DeviceKey {
    let mut key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    DeviceKey::new(key)
}

/// Encode a key for storage in a key file or the OS keyring
pub fn encode_key(key: &DeviceKey) -> String {
    BASE64.encode(key.as_bytes())
}

/// Decode a key previously produced by [`encode_key`]
pub fn decode_key(encoded: &str) -> EncryptionResult<DeviceKey> {
    let bytes = BASE64.decode(encoded.trim())?;
    let key: [u8; 32] = bytes.try_into().map_err(|bytes: Vec<u8>| {
        EncryptionError::InvalidKey(format!("expected 32 bytes, got {}", bytes.len()))
    })?;
    Ok(DeviceKey::new(key))
}

fn cipher(key: &DeviceKey) -> ChaCha20Poly1305 {
    ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()))
}

/// Encrypt `plaintext` under a fresh random nonce. The tag is appended to
/// the returned ciphertext.
pub fn encrypt(plaintext: &[u8], key: &DeviceKey) -> EncryptionResult<(Vec<u8>, [u8; NONCE_SIZE])> {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce);

    let ciphertext = cipher(key)
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| EncryptionError::Seal(e.to_string()))?;
    Ok((ciphertext, nonce))
}

pub fn decrypt(ciphertext: &[u8], key: &DeviceKey, nonce: &[u8]) -> EncryptionResult<Vec<u8>> {
    if nonce.len() != NONCE_SIZE {
        return Err(EncryptionError::Open(format!(
            "nonce is {} bytes, expected {}",
            nonce.len(),
            NONCE_SIZE
        )));
    }

    cipher(key)
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| EncryptionError::Open("authentication failed (wrong key or tampered value)".into()))
}

/// Seal a string value into its stored JSON form
pub fn seal(plaintext: &str, key: &DeviceKey) -> EncryptionResult<String> {
    let (ciphertext, nonce) = encrypt(plaintext.as_bytes(), key)?;
    let value = SealedValue::new(BASE64.encode(nonce), BASE64.encode(ciphertext));
    Ok(serde_json::to_string(&value)?)
}

/// Open a value produced by [`seal`]. Anything that is not a sealed value
/// (plain JSON snapshots included) is [`EncryptionError::NotSealed`].
pub fn open(stored: &str, key: &DeviceKey) -> EncryptionResult<String> {
    let value: SealedValue = serde_json::from_str(stored).map_err(|_| EncryptionError::NotSealed)?;
    if !value.is_sealed() {
        return Err(EncryptionError::NotSealed);
    }
    if value.version != SEAL_VERSION {
        return Err(EncryptionError::UnsupportedVersion(value.version));
    }

    let nonce = BASE64.decode(&value.nonce)?;
    let ciphertext = BASE64.decode(&value.sealed)?;
    let plaintext = decrypt(&ciphertext, key, &nonce)?;
    String::from_utf8(plaintext).map_err(|e| EncryptionError::Open(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_encoding() {
        let key = generate_key();
        let decoded = decode_key(&encode_key(&key)).unwrap();
        assert_eq!(key.as_bytes(), decoded.as_bytes());

        assert!(matches!(decode_key("c2hvcnQ="), Err(EncryptionError::InvalidKey(_))));
        assert!(matches!(decode_key("not base64!"), Err(EncryptionError::Base64(_))));
    }

    #[test]
    fn test_nonces_are_fresh() {
        let key = generate_key();
        let (first, nonce_a) = encrypt(b"same", &key).unwrap();
        let (second, nonce_b) = encrypt(b"same", &key).unwrap();

        assert_ne!(nonce_a, nonce_b);
        assert_ne!(first, second);
        assert_eq!(decrypt(&first, &key, &nonce_a).unwrap(), b"same");
    }

    #[test]
    fn test_seal_hides_plaintext() {
        let key = generate_key();
        let sealed = seal(r#"{"currentStreak":4}"#, &key).unwrap();

        assert!(sealed.contains("MEDFLASH_ENC"));
        assert!(!sealed.contains("currentStreak"));
        assert_eq!(open(&sealed, &key).unwrap(), r#"{"currentStreak":4}"#);
    }

    #[test]
    fn test_open_with_wrong_key_fails() {
        let sealed = seal("secret", &generate_key()).unwrap();
        let result = open(&sealed, &generate_key());
        assert!(matches!(result, Err(EncryptionError::Open(_))));
    }

    #[test]
    fn test_open_rejects_unsealed_values() {
        let key = generate_key();

        let foreign = r#"{"magic":"OTHER","version":1,"nonce":"","sealed":""}"#;
        assert!(matches!(open(foreign, &key), Err(EncryptionError::NotSealed)));
        assert!(matches!(open(r#"{"terms":[]}"#, &key), Err(EncryptionError::NotSealed)));
        assert!(matches!(open("plain text", &key), Err(EncryptionError::NotSealed)));

        let future = r#"{"magic":"MEDFLASH_ENC","version":9,"nonce":"","sealed":""}"#;
        assert!(matches!(open(future, &key), Err(EncryptionError::UnsupportedVersion(9))));
    }
}
