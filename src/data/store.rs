//! Persistent key-value snapshot store.
//!
//! Metric histories and the signed-in session survive restarts by being
//! mirrored into a small string-keyed store, one value per key. The trait
//! keeps the storage backend swappable: the CLI uses [`FileStore`], tests
//! use [`MemoryStore`].

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

/// String-keyed persistent store for serialized snapshots.
///
/// Writes are best-effort: a failed write is logged and otherwise ignored,
/// so a read-only state directory degrades to an in-memory-only session
/// rather than an error.
pub trait SnapshotStore: Send + Debug {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, overwriting any prior value.
    fn set(&mut self, key: &str, value: &str);

    /// Remove the value stored under `key`, if present.
    fn remove(&mut self, key: &str);
}

/// File-backed store: one file per key under a state directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first
    /// write, not here, so a missing directory only matters if something
    /// is actually persisted.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!("Failed to create state directory {}: {}", self.dir.display(), e);
            return;
        }
        let path = self.key_path(key);
        if let Err(e) = fs::write(&path, value) {
            warn!("Failed to persist {}: {}", path.display(), e);
        }
    }

    fn remove(&mut self, key: &str) {
        let path = self.key_path(key);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.get("humidity").is_none());

        store.set("humidity", "[1,2,3]");
        assert_eq!(store.get("humidity").as_deref(), Some("[1,2,3]"));

        store.set("humidity", "[4]");
        assert_eq!(store.get("humidity").as_deref(), Some("[4]"));

        store.remove("humidity");
        assert!(store.get("humidity").is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        assert!(store.get("temperature").is_none());

        store.set("temperature", r#"[{"value":21.5,"timestamp":"t"}]"#);
        assert_eq!(
            store.get("temperature").as_deref(),
            Some(r#"[{"value":21.5,"timestamp":"t"}]"#)
        );

        store.remove("temperature");
        assert!(store.get("temperature").is_none());
    }

    #[test]
    fn test_file_store_creates_directory_on_write() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("state").join("hearthwatch");
        let mut store = FileStore::new(&nested);

        store.set("session", "{}");
        assert!(nested.join("session.json").exists());
    }

    #[test]
    fn test_file_store_remove_missing_key_is_noop() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.remove("never-written");
    }
}
