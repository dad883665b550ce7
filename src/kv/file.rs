//! File-backed fallback store.
//!
//! A process-owned `HashMap` loaded once from a single JSON-object file and
//! rewritten wholesale on every mutation. There is no lock file and no
//! merge: two concurrent writers race and the last full-file write wins.
//! This is an accepted limitation of the development fallback, not a bug.

use crate::kv::{pattern_prefix, KvStore};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, Value>>,
}

impl FileStore {
    /// Open a store backed by `path`, loading whatever the file holds.
    ///
    /// A missing or unreadable file means an empty store; the file is only
    /// created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path: PathBuf = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, Value>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring malformed data file");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Rewrite the whole backing file from the in-memory map.
    fn persist(&self, entries: &HashMap<String, Value>) -> Result<()> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Storage(format!("Failed to serialize data file: {}", e)))?;
        fs::write(&self.path, raw)
            .map_err(|e| AppError::Storage(format!("Failed to write data file: {}", e)))
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value);
        self.persist(&entries)
    }

    async fn del(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.remove(key);
        self.persist(&entries)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let (prefix, wildcard) = pattern_prefix(pattern).ok_or_else(|| {
            AppError::Storage(format!("Unsupported key pattern: {}", pattern))
        })?;

        let entries = self.entries.lock();
        let keys = entries
            .keys()
            .filter(|key| {
                if wildcard {
                    key.starts_with(prefix)
                } else {
                    key.as_str() == prefix
                }
            })
            .cloned()
            .collect();
        Ok(keys)
    }

    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>> {
        let entries = self.entries.lock();
        Ok(keys.iter().map(|key| entries.get(key).cloned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileStore {
        FileStore::open(dir.path().join("agents.json"))
    }

    #[tokio::test]
    async fn get_returns_none_for_missing_key() {
        let dir = TempDir::new().unwrap();
        let kv = store(&dir);
        assert_eq!(kv.get("agent:ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let kv = store(&dir);
        kv.set("agent:john", json!({"name": "john"})).await.unwrap();
        assert_eq!(
            kv.get("agent:john").await.unwrap(),
            Some(json!({"name": "john"}))
        );
    }

    #[tokio::test]
    async fn mget_preserves_input_order_with_gaps() {
        let dir = TempDir::new().unwrap();
        let kv = store(&dir);
        kv.set("a", json!(1)).await.unwrap();
        kv.set("c", json!(3)).await.unwrap();

        let values = kv
            .mget(&["a".to_string(), "b".to_string(), "c".to_string()])
            .await
            .unwrap();
        assert_eq!(values, vec![Some(json!(1)), None, Some(json!(3))]);
    }

    #[tokio::test]
    async fn rejects_non_trailing_wildcard_patterns() {
        let dir = TempDir::new().unwrap();
        let kv = store(&dir);
        assert!(kv.keys("*:agent").await.is_err());
    }

    #[tokio::test]
    async fn malformed_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agents.json");
        fs::write(&path, "not json").unwrap();

        let kv = FileStore::open(&path);
        assert!(kv.keys("agent:*").await.unwrap().is_empty());
    }
}
