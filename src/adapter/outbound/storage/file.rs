//! JSON-file-backed store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::memory::MemoryStore;
use crate::error::StoreError;
use crate::port::storage::KeyValueStore;

/// A [`MemoryStore`] mirrored to a single JSON object on disk.
///
/// Every mutation rewrites the file through a temporary sibling and a
/// rename, so a crash never leaves a half-written file behind. A mutation
/// whose write fails is rolled back in memory.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file starts empty. An unreadable or malformed file is
    /// logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>, capacity: usize) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Cache file is corrupt, starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened cache file");
        Ok(Self {
            path,
            inner: MemoryStore::from_entries(entries, capacity),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string(self.inner.entries())
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn restore_all(&mut self, previous: Vec<(&String, String)>) {
        for (key, value) in previous {
            let _ = self.inner.set(key, value);
        }
    }

    fn restore(&mut self, key: &str, previous: Option<String>) {
        let _ = self.inner.remove(key);
        if let Some(previous) = previous {
            let _ = self.inner.set(key, previous);
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let previous = self.inner.get(key)?;
        self.inner.set(key, value)?;
        if let Err(err) = self.persist() {
            self.restore(key, previous);
            return Err(err);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let Some(previous) = self.inner.get(key)? else {
            return Ok(());
        };
        self.inner.remove(key)?;
        if let Err(err) = self.persist() {
            self.restore(key, Some(previous));
            return Err(err);
        }
        Ok(())
    }

    fn remove_many(&mut self, keys: &[String]) -> Result<usize, StoreError> {
        let mut previous = Vec::new();
        for key in keys {
            if let Some(value) = self.inner.get(key)? {
                previous.push((key, value));
            }
        }
        for (key, _) in &previous {
            self.inner.remove(key)?;
        }
        if previous.is_empty() {
            return Ok(0);
        }
        let removed = previous.len();
        if let Err(err) = self.persist() {
            self.restore_all(previous);
            return Err(err);
        }
        Ok(removed)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.inner.keys()
    }
}
