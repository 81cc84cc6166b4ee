//! [`KeyValueStore`](crate::port::storage::KeyValueStore) implementations.

pub mod file;
pub mod memory;
