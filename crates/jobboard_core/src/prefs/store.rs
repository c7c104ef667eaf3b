//! Preference store implementations.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while persisting preferences.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write preferences: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("No data directory available for preferences")]
    NoDataDir,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable string-keyed storage.
///
/// Writes are synchronous and per key; there is no transaction spanning
/// several keys.
pub trait PreferenceStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// On-disk layout of the preferences file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PrefsFile {
    /// File format version.
    version: u32,
    /// Key/value pairs.
    entries: BTreeMap<String, String>,
}

/// JSON file store. The whole key space is rewritten atomically on every
/// change (temp file, then rename).
#[derive(Debug)]
pub struct FileStore {
    /// Path to the preferences file.
    path: PathBuf,
    /// In-memory copy of the file.
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries.
    ///
    /// A missing file starts empty. An unreadable or malformed file is
    /// logged and also starts empty; it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str::<PrefsFile>(&content) {
                    Ok(file) => {
                        tracing::info!(
                            "Loaded {} preference(s) from {}",
                            file.entries.len(),
                            path.display()
                        );
                        file.entries
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", path.display(), e);
                        BTreeMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Open the store in the platform data directory.
    pub fn open_default() -> StoreResult<Self> {
        let path = Self::default_path().ok_or(StoreError::NoDataDir)?;
        Ok(Self::open(path))
    }

    /// `<data dir>/prefs.json` for this application.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "jobboard")
            .map(|dirs| dirs.data_dir().join("prefs.json"))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = PrefsFile {
            version: 1,
            entries: entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &json)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved {} preference(s) to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store_basics() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a"), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("1"));
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("2"));
        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert!(!store.contains("a"));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let store = FileStore::open(&path);
        store.set("userFilters", r#"{"searchTerm":"x"}"#).unwrap();
        store.set("orderedJobs", "[]").unwrap();
        store.remove("orderedJobs").unwrap();
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(
            reopened.get("userFilters").as_deref(),
            Some(r#"{"searchTerm":"x"}"#)
        );
        assert_eq!(reopened.get("orderedJobs"), None);
    }

    #[test]
    fn file_store_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let store = FileStore::open(&path);
        store.set("k", "v").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "garbage").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("anything"), None);

        store.set("k", "v").unwrap();
        assert_eq!(FileStore::open(&path).get("k").as_deref(), Some("v"));
    }

    #[test]
    fn shared_store_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let handle: Arc<MemoryStore> = Arc::clone(&store);
        handle.set("k", "v").unwrap();
        assert!(store.contains("k"));
    }
}
