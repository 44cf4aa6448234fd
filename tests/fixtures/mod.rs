//! Shared fixtures for the raceday integration tests

use raceday::race::{FixedPaceSource, RaceStarter, RewardCurve, UniformPaceSource};
use raceday::store::{MockRecordStore, RecordStore};
use raceday::types::{Gender, NewRace, NewRunner, Race, RaceGender, Runner};
use raceday::utils::current_timestamp;
use std::sync::Arc;

/// Build a starter over a mock store with a scripted pace sequence
pub fn create_test_system(paces: Vec<u32>) -> (Arc<MockRecordStore>, RaceStarter) {
    let store = Arc::new(MockRecordStore::new());
    let starter = RaceStarter::new(
        store.clone(),
        Arc::new(FixedPaceSource::new(paces)),
        RewardCurve::default(),
    )
    .unwrap();

    (store, starter)
}

/// Build a starter over a mock store with real randomized paces
pub fn create_randomized_system() -> (Arc<MockRecordStore>, Arc<RaceStarter>) {
    let store = Arc::new(MockRecordStore::new());
    let starter = Arc::new(
        RaceStarter::new(
            store.clone(),
            Arc::new(UniformPaceSource::default()),
            RewardCurve::default(),
        )
        .unwrap(),
    );

    (store, starter)
}

/// Register runners with the given genders; names and countries are filled in
pub async fn seed_runners(store: &MockRecordStore, genders: &[Gender]) -> Vec<Runner> {
    let mut runners = Vec::with_capacity(genders.len());
    for (i, gender) in genders.iter().enumerate() {
        let runner = store
            .insert_runner(NewRunner {
                name: format!("runner-{}", i + 1),
                country: "GB".to_string(),
                gender: *gender,
            })
            .await
            .unwrap();
        runners.push(runner);
    }
    runners
}

/// Register a race over the given distance and category
pub async fn seed_race(store: &MockRecordStore, distance: u32, gender: RaceGender) -> Race {
    store
        .insert_race(NewRace {
            name: "Test Race".to_string(),
            country: "GB".to_string(),
            date: current_timestamp(),
            distance,
            gender,
        })
        .await
        .unwrap()
}
