use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tokio::fs;

use super::kv::KeyValueStore;
use crate::encryption::EncryptionError;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encryption error: {0}")]
    Encryption(#[from] EncryptionError),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Key-value backend storing one JSON file per key under a directory
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("medflash"))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        fs::create_dir_all(&self.base_path).await?;

        // Write to a unique temp file and rename, so concurrent writers to the
        // same key each replace the file whole
        let tmp = self
            .base_path
            .join(format!(".{}.{:016x}.tmp", key, rand::thread_rng().gen::<u64>()));
        fs::write(&tmp, value).await?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("kv"));

        assert_eq!(store.get("medflash.progress").await.unwrap(), None);

        store.set("medflash.progress", r#"{"terms":[]}"#).await.unwrap();
        assert_eq!(
            store.get("medflash.progress").await.unwrap().as_deref(),
            Some(r#"{"terms":[]}"#)
        );
        assert!(dir.path().join("kv/medflash.progress.json").exists());

        store.remove("medflash.progress").await.unwrap();
        assert_eq!(store.get("medflash.progress").await.unwrap(), None);
        // Removing twice is fine
        store.remove("medflash.progress").await.unwrap();
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path().to_path_buf());

        for i in 0..5 {
            store.set("study-streak-storage", &i.to_string()).await.unwrap();
        }

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["study-streak-storage.json".to_string()]);
        assert_eq!(store.get("study-streak-storage").await.unwrap().as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path().to_path_buf());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                store.set(key, "x").await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
