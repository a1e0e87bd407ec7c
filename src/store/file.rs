//! JSON-file backed store
//!
//! The whole store is one small JSON document. Every write rewrites it through
//! a temporary file and a rename, so a crash mid-write leaves the previous
//! document intact.

use super::{PersistedStore, StoreError, StoredEntry};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    entries: BTreeMap<String, StoredEntry>,
}

/// Store persisted to a single JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(e.into()),
        };

        // Per-key values are checked by their readers; a damaged document as a
        // whole can only be dropped
        match serde_json::from_str(&raw) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "store file is malformed, starting empty");
                Ok(Document::default())
            }
        }
    }

    async fn write_document(&self, doc: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let raw = serde_json::to_string_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PersistedStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        let doc = self.read_document().await?;
        Ok(doc
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired(Utc::now()))
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        let now = Utc::now();
        doc.entries.retain(|_, entry| !entry.is_expired(now));
        doc.entries
            .insert(key.to_string(), StoredEntry::new(value, ttl, now));
        self.write_document(&doc).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        if doc.entries.remove(key).is_some() {
            self.write_document(&doc).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::new(&path);
        store.set("streak", "{}".to_string(), None).await.unwrap();
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("streak").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));
        assert_eq!(store.get("anything").await.unwrap(), None);

        // Deleting from a missing file does not create it
        store.delete("anything").await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn delete_removes_only_that_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));
        store.set("a", "1".to_string(), None).await.unwrap();
        store.set("b", "2".to_string(), None).await.unwrap();

        store.delete("a").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn expired_values_are_not_returned() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));
        store
            .set("session", "old".to_string(), Some(Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(store.get("session").await.unwrap(), None);
    }

    #[tokio::test]
    async fn damaged_document_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, "\u{0}garbage").await.unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("streak").await.unwrap(), None);

        store.set("streak", "1".to_string(), None).await.unwrap();
        assert_eq!(store.get("streak").await.unwrap().as_deref(), Some("1"));
    }
}
