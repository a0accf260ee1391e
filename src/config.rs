//! Application configuration, read from `config.toml` in the data directory

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::storage::migration::DEFAULT_CLEANUP_DELAY;
use crate::storage::{FileKeyValueStore, Result};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    /// Root directory for store snapshots and the device key
    #[serde(default)]
    pub data_dir: PathBuf,
    /// Directory of the legacy plaintext store (default: `<data_dir>/legacy`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_dir: Option<PathBuf>,
    /// Delay before a migrated legacy key is deleted
    #[serde(default = "default_cleanup_delay_ms")]
    pub legacy_cleanup_delay_ms: u64,
    /// Seal snapshots with the device key
    #[serde(default = "default_true")]
    pub encrypt: bool,
    /// Mirror the device key to the OS keyring
    #[serde(default = "default_true")]
    pub use_keyring: bool,
}

fn default_cleanup_delay_ms() -> u64 {
    DEFAULT_CLEANUP_DELAY.as_millis() as u64
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            legacy_dir: None,
            legacy_cleanup_delay_ms: default_cleanup_delay_ms(),
            encrypt: true,
            use_keyring: true,
        }
    }

    /// Load `config.toml` from `data_dir`, or defaults when the file is absent.
    /// `data_dir` wins over any `data_dir` set inside the file.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::with_data_dir(data_dir.to_path_buf()));
        }

        let content = fs::read_to_string(&path)?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.data_dir = data_dir.to_path_buf();
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from the platform default data directory
    pub fn load_default() -> Result<Self> {
        let data_dir = FileKeyValueStore::default_data_dir()?;
        Self::load(&data_dir)
    }

    /// Directory holding the current (secure) store snapshots
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    pub fn legacy_dir(&self) -> PathBuf {
        self.legacy_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("legacy"))
    }

    pub fn legacy_cleanup_delay(&self) -> Duration {
        Duration::from_millis(self.legacy_cleanup_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();

        assert_eq!(config.data_dir, dir.path());
        assert_eq!(config.legacy_dir(), dir.path().join("legacy"));
        assert_eq!(config.legacy_cleanup_delay(), Duration::from_secs(1));
        assert!(config.encrypt);
        assert!(config.use_keyring);
    }

    #[test]
    fn test_file_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "legacy_dir = \"/tmp/old-app\"\nlegacy_cleanup_delay_ms = 50\nencrypt = false\n",
        )
        .unwrap();

        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.legacy_dir(), PathBuf::from("/tmp/old-app"));
        assert_eq!(config.legacy_cleanup_delay(), Duration::from_millis(50));
        assert!(!config.encrypt);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "encrypt = maybe").unwrap();

        assert!(AppConfig::load(dir.path()).is_err());
    }
}
