//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the application services and the outside
//! world. Adapters implement them; tests swap in the scripted versions from
//! [`testkit`](crate::testkit).
//!
//! ```text
//!                 ┌───────────────────────────────┐
//!                 │          Application          │
//!                 │  cache · fetcher · rosters ·  │
//!                 │      optimizer · mapping      │
//!                 └───────────────┬───────────────┘
//!        ┌─────────────┬──────────┼──────────┬──────────────┐
//!        ▼             ▼          ▼          ▼              ▼
//!  KeyValueStore  HttpTransport  Clock    Sleeper    LeagueSource /
//!                                                 IdentifierMapper
//! ```
//!
//! # Available Ports
//!
//! - [`KeyValueStore`](storage::KeyValueStore) - Byte-capacity-bounded persistent key/value storage
//! - [`HttpTransport`](transport::HttpTransport) - Raw HTTP GET returning status and body
//! - [`Clock`](clock::Clock), [`Sleeper`](clock::Sleeper) - Wall-clock time and real-time delays
//! - [`PicksSource`](league::PicksSource) - Per-entry picks for an event
//! - [`LeagueSource`](league::LeagueSource) - League details, standings and bootstrap reference data
//! - [`IdentifierMapper`](league::IdentifierMapper) - Draft element id to canonical player id

pub mod clock;
pub mod league;
pub mod storage;
pub mod transport;
