//! Application services (use cases).
//!
//! These services orchestrate domain logic and reach the outside world only
//! through [`port`](crate::port) traits.
//!
//! - [`cache`]: TTL cache with capacity recovery
//! - [`fetcher`]: retrying, cache-backed JSON fetches
//! - [`roster`]: per-entry rosters, lineups and league ownership
//! - [`mapping`]: draft element id to canonical player id
//! - [`optimizer`]: lineup selection, replacements, swap suggestions
//! - [`league`]: refresh orchestration over an explicit context

pub mod cache;
pub mod fetcher;
pub mod league;
pub mod mapping;
pub mod optimizer;
pub mod roster;
