//! Key-value backing store interface and implementations
//!
//! The coordinator only needs two operations from its backing store: get a
//! blob by key and set a blob by key. No range queries, no transactions.
//! The single-key write is the trusted atomicity unit.

use crate::error::{DuelError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tokio::fs;

/// Trait for key-value blob storage
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the blob stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value
    async fn set(&self, key: &str, blob: String) -> Result<()>;
}

/// In-process key-value store.
///
/// Used as the ephemeral fallback when no durable store is configured and
/// as an isolated backend in tests. Nothing survives a process restart.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| DuelError::InternalError {
            message: "Failed to acquire store read lock".to_string(),
        })?;

        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, blob: String) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| DuelError::InternalError {
            message: "Failed to acquire store write lock".to_string(),
        })?;

        entries.insert(key.to_string(), blob);
        Ok(())
    }
}

/// Durable key-value store mapping each key to a JSON file in a directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// reader never observes a partially written blob.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DuelError::StoreUnavailable {
                message: format!("Failed to read key '{key}': {e}"),
            }
            .into()),
        }
    }

    async fn set(&self, key: &str, blob: String) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DuelError::StoreUnavailable {
                message: format!("Failed to create store directory: {e}"),
            })?;

        let target = self.path_for(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));

        fs::write(&tmp, blob)
            .await
            .map_err(|e| DuelError::StoreUnavailable {
                message: format!("Failed to write key '{key}': {e}"),
            })?;

        fs::rename(&tmp, &target)
            .await
            .map_err(|e| DuelError::StoreUnavailable {
                message: format!("Failed to commit key '{key}': {e}"),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_get_returns_none_for_missing_key() {
        let store = InMemoryKvStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn in_memory_set_then_get_round_trips() {
        let store = InMemoryKvStore::new();
        store.set("key", "value".to_string()).await.unwrap();
        assert_eq!(store.get("key").await.unwrap().as_deref(), Some("value"));

        // Overwrite replaces the previous value
        store.set("key", "other".to_string()).await.unwrap();
        assert_eq!(store.get("key").await.unwrap().as_deref(), Some("other"));
    }

    #[tokio::test]
    async fn file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::new(dir.path());

        assert!(store.get("communities").await.unwrap().is_none());

        store
            .set("communities", "[{\"id\":\"a\"}]".to_string())
            .await
            .unwrap();

        let blob = store.get("communities").await.unwrap().unwrap();
        assert_eq!(blob, "[{\"id\":\"a\"}]");

        // A second store over the same directory sees the same data
        let reopened = FileKvStore::new(dir.path());
        assert!(reopened.get("communities").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn file_store_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::new(dir.path());

        store.set("communities", "[]".to_string()).await.unwrap();

        assert!(!dir.path().join("communities.json.tmp").exists());
        assert!(dir.path().join("communities.json").exists());
    }
}
