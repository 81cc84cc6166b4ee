//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`http`]: [`ScriptedTransport`](http::ScriptedTransport), a queue of canned HTTP outcomes.
//! - [`time`]: [`ManualClock`](time::ManualClock) and [`RecordingSleeper`](time::RecordingSleeper) for deterministic TTL
//!   and backoff tests.
//! - [`store`]: [`CountingStore`](store::CountingStore), an observable shared-state store.
//! - [`league`]: [`ScriptedPicks`](league::ScriptedPicks) and [`MapMapper`](league::MapMapper) for roster tests.
//! - [`domain`]: Builders for players and squads.

pub mod domain;
pub mod http;
pub mod league;
pub mod store;
pub mod time;
