//! Draft league API adapter.

pub mod client;
pub mod dto;
pub mod settings;
