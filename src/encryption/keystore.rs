//! Device key provisioning for the secure store
//!
//! The key lives in a 0600 key file inside the data directory, optionally
//! mirrored to the OS keyring. Lookup order is file first, then keyring.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::crypto::{decode_key, encode_key, generate_key};
use super::models::DeviceKey;
use crate::storage::Result;

const KEYRING_SERVICE: &str = "medflash";
const KEYRING_USER: &str = "storage-key";
const KEY_FILE: &str = ".storage-key";

fn key_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(KEY_FILE)
}

/// Load the device key, generating and storing a new one on first run
pub fn load_or_create_key(data_dir: &Path, use_keyring: bool) -> Result<DeviceKey> {
    if let Some(key) = load_key(data_dir, use_keyring)? {
        return Ok(key);
    }

    log::info!("No storage key found, generating a new one");
    let key = generate_key();
    store_key(data_dir, &key, use_keyring)?;
    Ok(key)
}

/// Load the device key: try the key file first, then the keyring
pub fn load_key(data_dir: &Path, use_keyring: bool) -> Result<Option<DeviceKey>> {
    let file_path = key_file_path(data_dir);
    match fs::read_to_string(&file_path) {
        Ok(encoded) => return Ok(Some(decode_key(&encoded)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        // only a missing file may fall through to key generation
        Err(e) => return Err(e.into()),
    }
    if !use_keyring {
        return Ok(None);
    }

    let entry = match keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER) {
        Ok(entry) => entry,
        Err(e) => {
            log::debug!("Keyring unavailable: {}", e);
            return Ok(None);
        }
    };

    match entry.get_password() {
        Ok(encoded) => {
            let key = decode_key(&encoded)?;
            // Restore the file copy so later lookups don't depend on the keyring
            write_key_file(&file_path, &encoded)?;
            Ok(Some(key))
        }
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => {
            log::warn!("Keyring lookup failed, treating key as absent: {}", e);
            Ok(None)
        }
    }
}

/// Store the device key: always to the key file, best-effort to the keyring
pub fn store_key(data_dir: &Path, key: &DeviceKey, use_keyring: bool) -> Result<()> {
    let encoded = encode_key(key);
    write_key_file(&key_file_path(data_dir), &encoded)?;
    if !use_keyring {
        return Ok(());
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER) {
        if let Err(e) = entry.set_password(&encoded) {
            log::debug!("Could not mirror storage key to keyring: {}", e);
        }
    }

    Ok(())
}

fn write_key_file(path: &Path, encoded: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, encoded)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}
