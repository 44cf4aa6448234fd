//! In-memory record store implementations
//!
//! This module provides the in-memory record store used by the service and a
//! mock variant with failure injection for testing the all-or-nothing persist
//! guarantee.

use crate::error::{RaceServiceError, Result};
use crate::store::record::RecordStore;
use crate::types::{
    Gender, NewRace, NewRaceStatistic, NewRunner, Race, RaceId, RaceStatistic, RaceWithResults,
    Runner, RunnerId, StatisticId,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

/// All record tables behind one lock.
///
/// Holding every table under a single RwLock makes the batch persist atomic
/// and serializes concurrent start attempts against the same race.
#[derive(Debug, Default)]
struct Tables {
    runners: HashMap<RunnerId, Runner>,
    races: HashMap<RaceId, Race>,
    statistics: HashMap<StatisticId, RaceStatistic>,
    next_runner_id: RunnerId,
    next_race_id: RaceId,
    next_statistic_id: StatisticId,
}

impl Tables {
    fn race_results(&self, race_id: RaceId) -> Vec<RaceStatistic> {
        let mut results: Vec<RaceStatistic> = self
            .statistics
            .values()
            .filter(|stat| stat.race_id == race_id)
            .cloned()
            .collect();
        results.sort_by_key(|stat| stat.id);
        results
    }
}

/// In-memory record store implementation
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: RwLock<Tables>,
}

impl InMemoryRecordStore {
    /// Create a new, empty record store
    pub fn new() -> Self {
        Self::default()
    }

    fn read_tables(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| {
            RaceServiceError::InternalError {
                message: "Failed to acquire record tables read lock".to_string(),
            }
            .into()
        })
    }

    fn write_tables(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| {
            RaceServiceError::InternalError {
                message: "Failed to acquire record tables write lock".to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn race_with_results(&self, id: RaceId) -> Result<Option<RaceWithResults>> {
        let tables = self.read_tables()?;

        Ok(tables.races.get(&id).map(|race| RaceWithResults {
            race: race.clone(),
            results: tables.race_results(id),
        }))
    }

    async fn runners(&self, gender: Option<Gender>) -> Result<Vec<Runner>> {
        let tables = self.read_tables()?;

        let mut runners: Vec<Runner> = tables
            .runners
            .values()
            .filter(|runner| gender.map_or(true, |g| runner.gender == g))
            .cloned()
            .collect();
        runners.sort_by_key(|runner| runner.id);

        Ok(runners)
    }

    async fn persist_race_results(
        &self,
        race_id: RaceId,
        results: Vec<NewRaceStatistic>,
        updated_runners: Vec<Runner>,
    ) -> Result<Vec<RaceStatistic>> {
        let mut tables = self.write_tables()?;

        if !tables.races.contains_key(&race_id) {
            return Err(RaceServiceError::StorageFailure {
                message: format!("Race {} was deleted before results could be saved", race_id),
            }
            .into());
        }

        // The precondition re-check that keeps "start" exactly-once under
        // concurrent callers: the guard in the orchestrator may have read a
        // stale snapshot, this check cannot.
        if tables.statistics.values().any(|stat| stat.race_id == race_id) {
            return Err(RaceServiceError::RaceAlreadyStarted { race_id }.into());
        }

        // Validate the whole batch before touching any table, so a constraint
        // violation leaves no partial state behind.
        for result in &results {
            if result.race_id != race_id {
                return Err(RaceServiceError::StorageFailure {
                    message: format!(
                        "Result for race {} submitted in batch for race {}",
                        result.race_id, race_id
                    ),
                }
                .into());
            }
            if !tables.runners.contains_key(&result.runner_id) {
                return Err(RaceServiceError::StorageFailure {
                    message: format!("Result references unknown runner {}", result.runner_id),
                }
                .into());
            }
        }
        for runner in &updated_runners {
            if !tables.runners.contains_key(&runner.id) {
                return Err(RaceServiceError::StorageFailure {
                    message: format!("Rating update references unknown runner {}", runner.id),
                }
                .into());
            }
        }

        let mut stored = Vec::with_capacity(results.len());
        for result in results {
            tables.next_statistic_id += 1;
            let stat = RaceStatistic {
                id: tables.next_statistic_id,
                race_id: result.race_id,
                runner_id: result.runner_id,
                finish_time: result.finish_time,
            };
            tables.statistics.insert(stat.id, stat.clone());
            stored.push(stat);
        }

        for runner in updated_runners {
            tables.runners.insert(runner.id, runner);
        }

        Ok(stored)
    }

    async fn insert_runner(&self, runner: NewRunner) -> Result<Runner> {
        let mut tables = self.write_tables()?;

        tables.next_runner_id += 1;
        let runner = Runner {
            id: tables.next_runner_id,
            name: runner.name,
            country: runner.country,
            gender: runner.gender,
            rating: 0,
        };
        tables.runners.insert(runner.id, runner.clone());

        Ok(runner)
    }

    async fn insert_race(&self, race: NewRace) -> Result<Race> {
        let mut tables = self.write_tables()?;

        tables.next_race_id += 1;
        let race = Race {
            id: tables.next_race_id,
            name: race.name,
            country: race.country,
            date: race.date,
            distance: race.distance,
            gender: race.gender,
        };
        tables.races.insert(race.id, race.clone());

        Ok(race)
    }

    async fn runner(&self, id: RunnerId) -> Result<Option<Runner>> {
        let tables = self.read_tables()?;
        Ok(tables.runners.get(&id).cloned())
    }

    async fn delete_runner(&self, id: RunnerId) -> Result<bool> {
        let mut tables = self.write_tables()?;

        let removed = tables.runners.remove(&id).is_some();
        if removed {
            tables.statistics.retain(|_, stat| stat.runner_id != id);
        }

        Ok(removed)
    }

    async fn delete_race(&self, id: RaceId) -> Result<bool> {
        let mut tables = self.write_tables()?;

        let removed = tables.races.remove(&id).is_some();
        if removed {
            tables.statistics.retain(|_, stat| stat.race_id != id);
        }

        Ok(removed)
    }

    async fn runner_count(&self) -> Result<usize> {
        Ok(self.read_tables()?.runners.len())
    }

    async fn race_count(&self) -> Result<usize> {
        Ok(self.read_tables()?.races.len())
    }
}

/// Mock record store for testing
///
/// Delegates to an in-memory store, records every persist call, and can be
/// made to fail persists deterministically.
#[derive(Debug, Default)]
pub struct MockRecordStore {
    inner: InMemoryRecordStore,
    persist_calls: Mutex<Vec<(RaceId, Vec<NewRaceStatistic>, Vec<Runner>)>>,
    fail_persists: AtomicBool,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent persist fail with a storage error
    pub fn fail_persists(&self, fail: bool) {
        self.fail_persists.store(fail, Ordering::SeqCst);
    }

    /// Get all persist calls made (for testing)
    pub fn persist_call_count(&self) -> usize {
        self.persist_calls
            .lock()
            .map(|calls| calls.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn race_with_results(&self, id: RaceId) -> Result<Option<RaceWithResults>> {
        self.inner.race_with_results(id).await
    }

    async fn runners(&self, gender: Option<Gender>) -> Result<Vec<Runner>> {
        self.inner.runners(gender).await
    }

    async fn persist_race_results(
        &self,
        race_id: RaceId,
        results: Vec<NewRaceStatistic>,
        updated_runners: Vec<Runner>,
    ) -> Result<Vec<RaceStatistic>> {
        if let Ok(mut calls) = self.persist_calls.lock() {
            calls.push((race_id, results.clone(), updated_runners.clone()));
        }

        if self.fail_persists.load(Ordering::SeqCst) {
            return Err(RaceServiceError::StorageFailure {
                message: "Injected persist failure".to_string(),
            }
            .into());
        }

        self.inner
            .persist_race_results(race_id, results, updated_runners)
            .await
    }

    async fn insert_runner(&self, runner: NewRunner) -> Result<Runner> {
        self.inner.insert_runner(runner).await
    }

    async fn insert_race(&self, race: NewRace) -> Result<Race> {
        self.inner.insert_race(race).await
    }

    async fn runner(&self, id: RunnerId) -> Result<Option<Runner>> {
        self.inner.runner(id).await
    }

    async fn delete_runner(&self, id: RunnerId) -> Result<bool> {
        self.inner.delete_runner(id).await
    }

    async fn delete_race(&self, id: RaceId) -> Result<bool> {
        self.inner.delete_race(id).await
    }

    async fn runner_count(&self) -> Result<usize> {
        self.inner.runner_count().await
    }

    async fn race_count(&self) -> Result<usize> {
        self.inner.race_count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RaceGender;
    use crate::utils::current_timestamp;
    use std::time::Duration;

    fn new_runner(name: &str, gender: Gender) -> NewRunner {
        NewRunner {
            name: name.to_string(),
            country: "NO".to_string(),
            gender,
        }
    }

    fn new_race(gender: RaceGender) -> NewRace {
        NewRace {
            name: "Fjord 10K".to_string(),
            country: "NO".to_string(),
            date: current_timestamp(),
            distance: 10_000,
            gender,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = InMemoryRecordStore::new();

        let first = store
            .insert_runner(new_runner("Ingrid", Gender::Female))
            .await
            .unwrap();
        let second = store
            .insert_runner(new_runner("Olav", Gender::Male))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.rating, 0);
    }

    #[tokio::test]
    async fn test_runners_gender_filter_and_ordering() {
        let store = InMemoryRecordStore::new();
        store
            .insert_runner(new_runner("Ingrid", Gender::Female))
            .await
            .unwrap();
        store
            .insert_runner(new_runner("Olav", Gender::Male))
            .await
            .unwrap();
        store
            .insert_runner(new_runner("Astrid", Gender::Female))
            .await
            .unwrap();

        let all = store.runners(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|pair| pair[0].id < pair[1].id));

        let women = store.runners(Some(Gender::Female)).await.unwrap();
        assert_eq!(women.len(), 2);
        assert!(women.iter().all(|r| r.gender == Gender::Female));
    }

    #[tokio::test]
    async fn test_persist_rejects_second_batch_for_same_race() {
        let store = InMemoryRecordStore::new();
        let runner = store
            .insert_runner(new_runner("Olav", Gender::Male))
            .await
            .unwrap();
        let race = store.insert_race(new_race(RaceGender::General)).await.unwrap();

        let batch = vec![NewRaceStatistic {
            race_id: race.id,
            runner_id: runner.id,
            finish_time: Duration::from_secs(600),
        }];

        store
            .persist_race_results(race.id, batch.clone(), vec![])
            .await
            .unwrap();

        let err = store
            .persist_race_results(race.id, batch, vec![])
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RaceServiceError>(),
            Some(RaceServiceError::RaceAlreadyStarted { race_id }) if *race_id == race.id
        ));
    }

    #[tokio::test]
    async fn test_persist_constraint_violation_leaves_no_partial_state() {
        let store = InMemoryRecordStore::new();
        let runner = store
            .insert_runner(new_runner("Olav", Gender::Male))
            .await
            .unwrap();
        let race = store.insert_race(new_race(RaceGender::General)).await.unwrap();

        // Second row references a runner that does not exist.
        let batch = vec![
            NewRaceStatistic {
                race_id: race.id,
                runner_id: runner.id,
                finish_time: Duration::from_secs(600),
            },
            NewRaceStatistic {
                race_id: race.id,
                runner_id: 999,
                finish_time: Duration::from_secs(700),
            },
        ];

        let err = store
            .persist_race_results(race.id, batch, vec![])
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RaceServiceError>(),
            Some(RaceServiceError::StorageFailure { .. })
        ));

        let loaded = store.race_with_results(race.id).await.unwrap().unwrap();
        assert!(loaded.results.is_empty());
    }

    #[tokio::test]
    async fn test_delete_race_cascades_to_results() {
        let store = InMemoryRecordStore::new();
        let runner = store
            .insert_runner(new_runner("Olav", Gender::Male))
            .await
            .unwrap();
        let race = store.insert_race(new_race(RaceGender::General)).await.unwrap();

        store
            .persist_race_results(
                race.id,
                vec![NewRaceStatistic {
                    race_id: race.id,
                    runner_id: runner.id,
                    finish_time: Duration::from_secs(600),
                }],
                vec![],
            )
            .await
            .unwrap();

        assert!(store.delete_race(race.id).await.unwrap());
        assert!(store.race_with_results(race.id).await.unwrap().is_none());

        // The cascade removed the orphaned result row as well, so a re-created
        // race with the same id would start from a clean slate.
        let tables = store.read_tables().unwrap();
        assert!(tables.statistics.is_empty());
    }

    #[tokio::test]
    async fn test_mock_store_failure_injection() {
        let store = MockRecordStore::new();
        let runner = store
            .insert_runner(new_runner("Olav", Gender::Male))
            .await
            .unwrap();
        let race = store.insert_race(new_race(RaceGender::General)).await.unwrap();

        store.fail_persists(true);

        let err = store
            .persist_race_results(
                race.id,
                vec![NewRaceStatistic {
                    race_id: race.id,
                    runner_id: runner.id,
                    finish_time: Duration::from_secs(600),
                }],
                vec![],
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RaceServiceError>(),
            Some(RaceServiceError::StorageFailure { .. })
        ));
        assert_eq!(store.persist_call_count(), 1);

        let loaded = store.race_with_results(race.id).await.unwrap().unwrap();
        assert!(loaded.results.is_empty());
    }
}
