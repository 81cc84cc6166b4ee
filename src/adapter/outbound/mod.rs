//! Outbound adapters (driven side).

pub mod dataset;
pub mod draft;
pub mod http;
pub mod storage;
