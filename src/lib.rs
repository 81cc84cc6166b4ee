//! Draftwise - lineup and transfer assistant for draft fantasy-football leagues.
//!
//! Pulls league, standings and pick data from the draft API through a
//! persistent TTL cache with retry and backoff, maps draft player ids onto
//! the main game's ids, and runs a greedy lineup optimizer and free-agent
//! search over an externally produced player dataset.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Players, positions, lineups, formation rules, smart score
//! - [`port`] - Traits at the seams: storage, HTTP, time, league data
//! - [`application`] - Cache, resilient fetcher, roster repository, id
//!   mapping, optimizer and the league service
//! - [`adapter`] - `reqwest` transport, memory/file stores, draft API client,
//!   dataset loader, CLI
//! - [`infrastructure`] - TOML configuration, logging, wiring
//!
//! # Example
//!
//! ```no_run
//! use draftwise::infrastructure::bootstrap::build_league_service;
//! use draftwise::infrastructure::config::settings::Config;
//!
//! # async fn run() -> draftwise::error::Result<()> {
//! let config = Config::load("draftwise.toml")?;
//! let mut service = build_league_service(&config)?;
//! let snapshot = service.refresh(config.league.id).await?;
//! println!("{} rosters loaded for event {}", snapshot.summary.loaded, snapshot.event);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
