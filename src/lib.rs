//! Raceday - runner and race registry service
//!
//! This crate provides a registry of runners, races, and per-race results.
//! Its core is the race start routine: a guarded one-time transition that
//! simulates finish times for the eligible field, ranks it, and pays each
//! runner a decaying rating reward, persisted as one atomic batch.

pub mod config;
pub mod error;
pub mod race;
pub mod service;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RaceServiceError, Result};
pub use types::*;

// Re-export key components
pub use race::{RaceStarter, RewardCurve};
pub use store::{InMemoryRecordStore, RecordStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
