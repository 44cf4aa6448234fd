//! Race start orchestrator
//!
//! Composes eligibility selection, result synthesis, and ranking into the
//! single guarded operation exposed to callers: starting a race. A race has
//! two states, not started (no result rows) and completed (result rows
//! present), and exactly one irreversible transition between them.

use crate::error::{RaceServiceError, Result};
use crate::race::eligibility::select_eligible;
use crate::race::ranking::{rank_and_reward, RewardCurve};
use crate::race::simulation::{synthesize_results, PaceSource};
use crate::store::RecordStore;
use crate::types::{Gender, NewRaceStatistic, RaceGender, RaceId, RaceWithResults, Runner};
use std::sync::Arc;
use tracing::{debug, info};

/// The race start orchestrator
pub struct RaceStarter {
    store: Arc<dyn RecordStore>,
    paces: Arc<dyn PaceSource>,
    reward: RewardCurve,
}

impl RaceStarter {
    /// Create a new race starter
    pub fn new(
        store: Arc<dyn RecordStore>,
        paces: Arc<dyn PaceSource>,
        reward: RewardCurve,
    ) -> Result<Self> {
        reward.validate()?;

        Ok(Self {
            store,
            paces,
            reward,
        })
    }

    /// Start a race: simulate the eligible field, rank it, pay rating
    /// rewards, and persist everything as one atomic batch.
    ///
    /// Fails with `RaceNotFound` for an unknown id, `RaceAlreadyStarted` if
    /// the race already has result rows, `NoEligibleRunners` for an empty
    /// field, and `StorageFailure` if the persist step fails. A failed start
    /// leaves the race untouched; there is no retry and no partial state.
    pub async fn start_race(&self, race_id: RaceId) -> Result<RaceWithResults> {
        let loaded = self
            .store
            .race_with_results(race_id)
            .await?
            .ok_or(RaceServiceError::RaceNotFound { race_id })?;

        // Fast-path guard; the store re-checks this precondition inside the
        // persist critical section, so concurrent starts cannot both commit.
        if loaded.has_started() {
            return Err(RaceServiceError::RaceAlreadyStarted { race_id }.into());
        }

        let race = loaded.race;

        let population = self.store.runners(gender_filter(race.gender)).await?;
        let eligible = select_eligible(race.gender, population);
        if eligible.is_empty() {
            return Err(RaceServiceError::NoEligibleRunners { race_id }.into());
        }

        debug!(
            "Simulating race {} ({}m, {}) for {} runners",
            race_id,
            race.distance,
            race.gender,
            eligible.len()
        );

        let results = synthesize_results(&race, eligible, self.paces.as_ref())?;
        let ranked = rank_and_reward(results, &self.reward);

        let mut new_results = Vec::with_capacity(ranked.len());
        let mut updated_runners: Vec<Runner> = Vec::with_capacity(ranked.len());
        for outcome in ranked {
            new_results.push(NewRaceStatistic {
                race_id,
                runner_id: outcome.runner.id,
                finish_time: outcome.finish_time,
            });
            updated_runners.push(outcome.runner);
        }

        let stored = self
            .store
            .persist_race_results(race_id, new_results, updated_runners)
            .await?;

        info!(
            "Race {} started: {} results persisted, winner runner {}",
            race_id,
            stored.len(),
            stored.first().map(|stat| stat.runner_id).unwrap_or_default()
        );

        Ok(RaceWithResults {
            race,
            results: stored,
        })
    }
}

/// Push the gender restriction down to the store's bulk read where the
/// category is single-gender; General reads the whole population.
fn gender_filter(category: RaceGender) -> Option<Gender> {
    match category {
        RaceGender::Male => Some(Gender::Male),
        RaceGender::Female => Some(Gender::Female),
        RaceGender::General => None,
    }
}
