//! File-backed key/value storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use scout_core::storage::KeyValueStore;
use scout_core::{Result, ScoutError};

/// Durable key/value storage writing one JSON document per key.
///
/// Each key is stored as `<base_dir>/<key>.json`; a missing file reads as
/// an absent value. Keys are written independently with no multi-key
/// transaction, so the last successful write for a key wins. Writes go
/// through a temporary file in the same directory followed by an atomic
/// rename, so a crash mid-write never leaves a truncated document.
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `base_dir`, creating the directory if it
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Fails with a storage error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir).map_err(|e| {
            ScoutError::storage(format!(
                "Failed to create storage directory {:?}: {}",
                base_dir, e
            ))
        })?;
        Ok(Self { base_dir })
    }

    /// Creates a store at the default location (`~/.scout`).
    pub fn default_location() -> Result<Self> {
        Self::new(crate::paths::default_data_dir()?)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScoutError::storage(format!(
                "Failed to read {:?}: {}",
                path, e
            ))),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let path = self.key_path(key);
        let tmp_path = self.base_dir.join(format!("{}.json.tmp", key));

        let mut tmp_file = tokio::fs::File::create(&tmp_path)
            .await
            .map_err(|e| ScoutError::storage(format!("Failed to create {:?}: {}", tmp_path, e)))?;
        tmp_file
            .write_all(value.as_bytes())
            .await
            .map_err(|e| ScoutError::storage(format!("Failed to write {:?}: {}", tmp_path, e)))?;
        // Flush to disk before the rename makes the document visible
        tmp_file
            .sync_all()
            .await
            .map_err(|e| ScoutError::storage(format!("Failed to sync {:?}: {}", tmp_path, e)))?;
        drop(tmp_file);

        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| ScoutError::storage(format!("Failed to write {:?}: {}", path, e)))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ScoutError::storage(format!(
                "Failed to remove {:?}: {}",
                path, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store
            .set("user", r#"{"user_id":"u1"}"#.to_string())
            .await
            .unwrap();
        let value = store.get("user").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"user_id":"u1"}"#));
    }

    #[tokio::test]
    async fn test_overwrite_leaves_new_value_and_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.set("user", r#"{"user_id":"u1"}"#.to_string()).await.unwrap();
        store.set("user", r#"{"user_id":"u2"}"#.to_string()).await.unwrap();

        assert_eq!(
            store.get("user").await.unwrap().as_deref(),
            Some(r#"{"user_id":"u2"}"#)
        );
        assert!(!dir.path().join("user.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_missing_key_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        assert!(store.get("favorites").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.set("user", "{}".to_string()).await.unwrap();
        store.remove("user").await.unwrap();
        assert!(store.get("user").await.unwrap().is_none());

        // Removing an already-absent key succeeds
        store.remove("user").await.unwrap();
    }

    #[tokio::test]
    async fn test_values_survive_store_reconstruction() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonFileStore::new(dir.path()).unwrap();
            store.set("favorites", "[]".to_string()).await.unwrap();
        }
        let reopened = JsonFileStore::new(dir.path()).unwrap();
        assert_eq!(
            reopened.get("favorites").await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
