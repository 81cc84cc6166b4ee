//! Persistent TTL cache over a [`KeyValueStore`].
//!
//! Entries are stored as JSON `{ "timestamp": <epoch ms>, "data": <payload> }`
//! under `<namespace><key>`. An entry is valid while `now - timestamp < ttl`.
//! Nothing here ever fails the caller: unreadable entries are cache misses
//! and unwritable entries are skipped.
//!
//! When the store reports [`StoreError::CapacityExceeded`](crate::error::StoreError)
//! on a write, every key in the namespace except the preserved key is
//! evicted and the write is retried exactly once.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::port::clock::{Clock, SystemClock};
use crate::port::storage::KeyValueStore;

/// Cache behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub ttl: Duration,
    /// Prefix applied to every key; bulk eviction is limited to it.
    pub namespace: String,
    /// Full key that survives bulk eviction (e.g. the signed-in user).
    pub preserved_key: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            namespace: "fpl_".to_string(),
            preserved_key: "fpl_user".to_string(),
        }
    }
}

/// Outcome of [`TtlCache::put`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheWrite {
    Stored,
    /// Stored on the retry after the namespace was evicted.
    StoredAfterEviction { evicted: usize },
    /// Not cached; the caller's data flow is unaffected.
    Skipped,
}

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    timestamp: i64,
    data: serde_json::Value,
}

/// Thread-safe TTL cache.
///
/// The store sits behind a mutex held for each whole read-modify-write, so
/// eviction-and-retry cannot interleave with other writers.
pub struct TtlCache {
    store: Mutex<Box<dyn KeyValueStore>>,
    clock: Arc<dyn Clock>,
    settings: CacheSettings,
}

impl TtlCache {
    #[must_use]
    pub fn new(store: impl KeyValueStore + 'static, settings: CacheSettings) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), settings)
    }

    #[must_use]
    pub fn with_clock(
        store: impl KeyValueStore + 'static,
        clock: Arc<dyn Clock>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            store: Mutex::new(Box::new(store)),
            clock,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{key}", self.settings.namespace)
    }

    fn ttl_millis(&self) -> i64 {
        i64::try_from(self.settings.ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Return the cached value for `key` if present, fresh and decodable.
    ///
    /// Stale or corrupt entries are deleted.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let full_key = self.full_key(key);
        let mut store = self.store.lock();

        let raw = match store.get(&full_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %full_key, error = %err, "Cache read failed, treating as miss");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(key = %full_key, error = %err, "Corrupt cache entry, removing");
                discard(store.as_mut(), &full_key);
                return None;
            }
        };

        let age = self.clock.now_millis().saturating_sub(entry.timestamp);
        if age >= self.ttl_millis() {
            debug!(key = %full_key, age_ms = age, "Cache entry expired");
            discard(store.as_mut(), &full_key);
            return None;
        }

        match serde_json::from_value(entry.data) {
            Ok(value) => {
                debug!(key = %full_key, "Cache hit");
                Some(value)
            }
            Err(err) => {
                warn!(key = %full_key, error = %err, "Cached payload has unexpected shape, removing");
                discard(store.as_mut(), &full_key);
                None
            }
        }
    }

    /// Store `value` under `key`, stamped with the current time.
    ///
    /// Best effort: see [`CacheWrite`].
    pub fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> CacheWrite {
        let full_key = self.full_key(key);
        let encoded = match serde_json::to_value(value).and_then(|data| {
            serde_json::to_string(&CacheEntry {
                timestamp: self.clock.now_millis(),
                data,
            })
        }) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(key = %full_key, error = %err, "Failed to encode cache entry");
                return CacheWrite::Skipped;
            }
        };

        let mut store = self.store.lock();
        match store.set(&full_key, encoded.clone()) {
            Ok(()) => {
                debug!(key = %full_key, "Cached");
                CacheWrite::Stored
            }
            Err(err) if err.is_capacity_exceeded() => {
                warn!(key = %full_key, error = %err, "Cache full, evicting namespace");
                let evicted = self.evict_namespace(store.as_mut());
                match store.set(&full_key, encoded) {
                    Ok(()) => {
                        info!(key = %full_key, evicted, "Cached after eviction");
                        CacheWrite::StoredAfterEviction { evicted }
                    }
                    Err(err) => {
                        warn!(key = %full_key, error = %err, "Still cannot cache, proceeding without");
                        CacheWrite::Skipped
                    }
                }
            }
            Err(err) => {
                warn!(key = %full_key, error = %err, "Failed to write cache entry");
                CacheWrite::Skipped
            }
        }
    }

    /// Remove one entry. Returns whether it existed.
    pub fn invalidate(&self, key: &str) -> bool {
        let full_key = self.full_key(key);
        let mut store = self.store.lock();
        let existed = matches!(store.get(&full_key), Ok(Some(_)));
        discard(store.as_mut(), &full_key);
        existed
    }

    /// Remove every entry whose un-namespaced key satisfies `predicate`.
    pub fn invalidate_where(&self, predicate: impl Fn(&str) -> bool) -> usize {
        let namespace = self.settings.namespace.as_str();
        let mut store = self.store.lock();
        let keys = match store.keys() {
            Ok(keys) => keys,
            Err(err) => {
                warn!(error = %err, "Cannot list cache keys");
                return 0;
            }
        };

        let doomed: Vec<String> = keys
            .into_iter()
            .filter(|key| {
                key.strip_prefix(namespace).is_some_and(|short| predicate(short))
                    && *key != self.settings.preserved_key
            })
            .collect();
        discard_all(store.as_mut(), &doomed)
    }

    /// Evict the whole namespace except the preserved key.
    pub fn clear(&self) -> usize {
        let mut store = self.store.lock();
        self.evict_namespace(store.as_mut())
    }

    fn evict_namespace(&self, store: &mut dyn KeyValueStore) -> usize {
        let keys = match store.keys() {
            Ok(keys) => keys,
            Err(err) => {
                warn!(error = %err, "Cannot list cache keys for eviction");
                return 0;
            }
        };

        let doomed: Vec<String> = keys
            .into_iter()
            .filter(|k| k.starts_with(&self.settings.namespace) && *k != self.settings.preserved_key)
            .collect();
        discard_all(store, &doomed)
    }
}

fn discard_all(store: &mut dyn KeyValueStore, keys: &[String]) -> usize {
    if keys.is_empty() {
        return 0;
    }
    match store.remove_many(keys) {
        Ok(removed) => removed,
        Err(err) => {
            warn!(keys = keys.len(), error = %err, "Failed to remove cache entries");
            0
        }
    }
}

fn discard(store: &mut dyn KeyValueStore, key: &str) {
    if let Err(err) = store.remove(key) {
        warn!(key, error = %err, "Failed to remove cache entry");
    }
}
