//! Observable key/value store.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::adapter::outbound::storage::memory::MemoryStore;
use crate::error::StoreError;
use crate::port::storage::KeyValueStore;

/// A [`MemoryStore`] behind shared state.
///
/// Clones see the same contents, so a test can hand one clone to a cache
/// and inspect the other.
#[derive(Debug, Clone)]
pub struct CountingStore {
    inner: Arc<Mutex<MemoryStore>>,
    set_calls: Arc<AtomicU32>,
    remove_calls: Arc<AtomicU32>,
    batch_calls: Arc<AtomicU32>,
}

impl CountingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
            set_calls: Arc::new(AtomicU32::new(0)),
            remove_calls: Arc::new(AtomicU32::new(0)),
            batch_calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(MemoryStore::unbounded())
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self::new(MemoryStore::with_capacity(bytes))
    }

    pub fn contains(&self, key: &str) -> bool {
        matches!(self.inner.lock().get(key), Ok(Some(_)))
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key).ok().flatten()
    }

    /// Number of `set` calls, successful or not.
    pub fn set_calls(&self) -> u32 {
        self.set_calls.load(Ordering::SeqCst)
    }

    /// Number of single-key `remove` calls.
    pub fn remove_calls(&self) -> u32 {
        self.remove_calls.load(Ordering::SeqCst)
    }

    /// Number of `remove_many` batches.
    pub fn batch_calls(&self) -> u32 {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.lock().get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lock().set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lock().remove(key)
    }

    fn remove_many(&mut self, keys: &[String]) -> Result<usize, StoreError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lock().remove_many(keys)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.inner.lock().keys()
    }
}
