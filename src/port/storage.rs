//! Persistent key/value storage port.

use crate::error::StoreError;

/// A synchronous, byte-capacity-bounded string store.
///
/// Writes that would exceed the capacity must fail with
/// [`StoreError::CapacityExceeded`] and leave the store unchanged, so the
/// caller can free space and retry.
pub trait KeyValueStore: Send {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Remove every key in `keys` as one mutation, returning how many existed.
    ///
    /// Stores with a costly write path override this to persist once per
    /// batch.
    fn remove_many(&mut self, keys: &[String]) -> Result<usize, StoreError> {
        let mut removed = 0;
        for key in keys {
            if self.get(key)?.is_some() {
                self.remove(key)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// All keys currently stored, in no particular order.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}
