//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`]: the command-line interface
//! - [`outbound`]: HTTP transport, key/value stores, the draft API client and
//!   the player dataset loader

pub mod inbound;
pub mod outbound;
