//! In-memory store with a byte budget.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::port::storage::KeyValueStore;

/// A `HashMap` store that refuses writes beyond `capacity` bytes.
///
/// Usage is the sum of key and value lengths, mirroring how browser storage
/// quotas are charged.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    capacity: usize,
    used: usize,
}

fn footprint(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

impl MemoryStore {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
            used: 0,
        }
    }

    #[must_use]
    pub fn unbounded() -> Self {
        Self::with_capacity(usize::MAX)
    }

    /// Build from existing entries without enforcing the capacity.
    #[must_use]
    pub(crate) fn from_entries(entries: HashMap<String, String>, capacity: usize) -> Self {
        let used = entries.iter().map(|(k, v)| footprint(k, v)).sum();
        Self {
            entries,
            capacity,
            used,
        }
    }

    pub(crate) const fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }

    #[must_use]
    pub const fn used_bytes(&self) -> usize {
        self.used
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let replaced = self.entries.get(key).map_or(0, |old| footprint(key, old));
        let required = footprint(key, &value);
        let available = self.capacity.saturating_sub(self.used - replaced);
        if required > available {
            return Err(StoreError::CapacityExceeded {
                required,
                capacity: available,
            });
        }
        self.used = self.used - replaced + required;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if let Some(old) = self.entries.remove(key) {
            self.used -= footprint(key, &old);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_usage_across_replace_and_remove() {
        let mut store = MemoryStore::with_capacity(100);
        store.set("ab", "1234".into()).unwrap();
        assert_eq!(store.used_bytes(), 6);
        store.set("ab", "12".into()).unwrap();
        assert_eq!(store.used_bytes(), 4);
        store.remove("ab").unwrap();
        assert_eq!(store.used_bytes(), 0);
        store.remove("ab").unwrap();
    }

    #[test]
    fn rejects_writes_over_capacity_without_mutating() {
        let mut store = MemoryStore::with_capacity(10);
        store.set("k", "12345".into()).unwrap();

        let err = store.set("x", "123456".into()).unwrap_err();
        assert!(err.is_capacity_exceeded());
        assert_eq!(store.get("x").unwrap(), None);
        assert_eq!(store.used_bytes(), 6);
    }

    #[test]
    fn replacing_can_reuse_the_old_space() {
        let mut store = MemoryStore::with_capacity(10);
        store.set("k", "123456789".into()).unwrap();
        store.set("k", "987654321".into()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("987654321"));
    }
}
