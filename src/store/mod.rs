//! Record store interface and implementations
//!
//! The record store is the persistence collaborator of the race core: it holds
//! runner, race, and result records and offers point lookup, filtered bulk
//! read, and an atomic batch persist for race results.

pub mod memory;
pub mod record;

pub use memory::{InMemoryRecordStore, MockRecordStore};
pub use record::RecordStore;
