//! Record store trait
//!
//! This module defines the interface the race core relies on for reading and
//! writing runner, race, and result records.

use crate::error::Result;
use crate::types::{
    Gender, NewRace, NewRaceStatistic, NewRunner, Race, RaceId, RaceStatistic, RaceWithResults,
    Runner, RunnerId,
};
use async_trait::async_trait;

/// Trait for record store operations
///
/// Implementations must make `persist_race_results` atomic: either every
/// result row and every runner update in the batch is applied, or none is.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Get a race together with its current result rows
    async fn race_with_results(&self, id: RaceId) -> Result<Option<RaceWithResults>>;

    /// Get all runners, optionally restricted to one gender
    ///
    /// Returned in ascending id order so callers see a stable ordering.
    async fn runners(&self, gender: Option<Gender>) -> Result<Vec<Runner>>;

    /// Atomically persist a race's result batch and the updated runner ratings
    ///
    /// Re-checks that the race still has no result rows inside the same
    /// critical section and fails with `RaceAlreadyStarted` if that
    /// precondition no longer holds, so two concurrent starts of the same
    /// race cannot both commit. Returns the stored rows with assigned ids.
    async fn persist_race_results(
        &self,
        race_id: RaceId,
        results: Vec<NewRaceStatistic>,
        updated_runners: Vec<Runner>,
    ) -> Result<Vec<RaceStatistic>>;

    /// Register a new runner
    async fn insert_runner(&self, runner: NewRunner) -> Result<Runner>;

    /// Register a new race
    async fn insert_race(&self, race: NewRace) -> Result<Race>;

    /// Get a runner by id
    async fn runner(&self, id: RunnerId) -> Result<Option<Runner>>;

    /// Delete a runner and, as a cascade, its result rows
    async fn delete_runner(&self, id: RunnerId) -> Result<bool>;

    /// Delete a race and, as a cascade, its result rows
    async fn delete_race(&self, id: RaceId) -> Result<bool>;

    /// Total number of registered runners
    async fn runner_count(&self) -> Result<usize>;

    /// Total number of registered races
    async fn race_count(&self) -> Result<usize>;
}
