pub mod clock;
pub mod config;
pub mod context;
pub mod encryption;
pub mod storage;
pub mod streak;
pub mod terms;

use std::sync::Arc;

use config::AppConfig;
use context::StoreContext;
use encryption::load_or_create_key;
use storage::{EncryptedKeyValueStore, FileKeyValueStore, KeyValueStore};
use streak::StreakStore;
use terms::ProgressStore;

/// Both stores, created once and handed to the UI layer
pub struct Stores {
    pub progress: ProgressStore,
    pub streak: StreakStore,
}

impl Stores {
    /// Build stores over one shared context
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            progress: ProgressStore::new(ctx.clone()),
            streak: StreakStore::new(ctx),
        }
    }

    /// Build stores over the on-disk backends described by `config`
    pub fn open(config: &AppConfig) -> storage::Result<Self> {
        let files: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(config.store_dir()));
        let secure: Arc<dyn KeyValueStore> = if config.encrypt {
            let key = load_or_create_key(&config.data_dir, config.use_keyring)?;
            Arc::new(EncryptedKeyValueStore::new(files, key))
        } else {
            log::warn!("Snapshot encryption disabled by config");
            files
        };
        let legacy: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(config.legacy_dir()));

        let ctx = StoreContext::new(secure, legacy).with_cleanup_delay(config.legacy_cleanup_delay());
        Ok(Self::new(ctx))
    }

    /// Hydrate both stores
    pub async fn init(&mut self) {
        self.progress.init().await;
        self.streak.init().await;
    }

    /// Wait for every outstanding write and legacy cleanup
    pub async fn flush(&mut self) {
        self.progress.flush().await;
        self.streak.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::with_data_dir(dir.path().to_path_buf());
        config.legacy_cleanup_delay_ms = 5;
        config.use_keyring = false;
        config
    }

    #[tokio::test]
    async fn test_open_persists_encrypted_snapshots() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let mut stores = Stores::open(&config).unwrap();
        stores.init().await;
        stores.progress.update_progress("1", true);
        stores.streak.record_study_session();
        stores.flush().await;

        let raw = fs::read_to_string(config.store_dir().join("medflash.progress.json")).unwrap();
        assert!(raw.contains("MEDFLASH_ENC"));
        assert!(!raw.contains("Tachycardia"));

        let mut reopened = Stores::open(&config).unwrap();
        reopened.init().await;
        assert_eq!(reopened.progress.get_progress("1").unwrap().times_correct, 1);
        assert_eq!(reopened.streak.current_streak(), 1);
    }

    #[tokio::test]
    async fn test_open_migrates_legacy_files() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let legacy_dir = config.legacy_dir();
        fs::create_dir_all(&legacy_dir).unwrap();
        fs::write(
            legacy_dir.join("study-streak-storage.json"),
            r#"{"state":{"currentStreak":0,"longestStreak":12,"studyDates":[],"weekProgress":[false,false,false,false,false,false,false]},"version":0}"#,
        )
        .unwrap();

        let mut stores = Stores::open(&config).unwrap();
        stores.init().await;
        assert_eq!(stores.streak.longest_streak(), 12);
        // no legacy progress: built-in catalog
        assert_eq!(stores.progress.terms().len(), terms::catalog::sample_terms().len());

        stores.flush().await;
        assert!(!legacy_dir.join("study-streak-storage.json").exists());
        assert!(config.store_dir().join("medflash.streak.json").exists());
    }

    #[tokio::test]
    async fn test_unencrypted_mode_writes_plain_json() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.encrypt = false;

        let mut stores = Stores::open(&config).unwrap();
        stores.init().await;
        stores.flush().await;

        let raw = fs::read_to_string(config.store_dir().join("medflash.progress.json")).unwrap();
        assert!(raw.contains("Tachycardia"));
        assert!(!dir.path().join(".storage-key").exists());
    }
}
