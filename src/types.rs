//! Common types used throughout the race registry service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unique identifier for runners
pub type RunnerId = i64;

/// Unique identifier for races
pub type RaceId = i64;

/// Unique identifier for race statistics (result rows)
pub type StatisticId = i64;

/// Gender category of a runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Gender category a race is open to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceGender {
    Male,
    Female,
    General,
}

impl RaceGender {
    /// Whether a runner of the given gender may compete in this race.
    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            RaceGender::General => true,
            RaceGender::Male => gender == Gender::Male,
            RaceGender::Female => gender == Gender::Female,
        }
    }
}

impl std::fmt::Display for RaceGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RaceGender::Male => write!(f, "Male"),
            RaceGender::Female => write!(f, "Female"),
            RaceGender::General => write!(f, "General"),
        }
    }
}

/// A registered runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    pub id: RunnerId,
    pub name: String,
    pub country: String,
    pub gender: Gender,
    /// Cumulative rating, increased only by race participation rewards.
    /// Starts at 0 and is never reset.
    pub rating: i64,
}

/// A registered race
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub name: String,
    pub country: String,
    pub date: DateTime<Utc>,
    /// Target distance in meters; always positive.
    pub distance: u32,
    pub gender: RaceGender,
}

/// One runner's result in one race
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceStatistic {
    pub id: StatisticId,
    pub race_id: RaceId,
    pub runner_id: RunnerId,
    pub finish_time: Duration,
}

/// Fields for registering a new runner; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRunner {
    pub name: String,
    pub country: String,
    pub gender: Gender,
}

/// Fields for registering a new race; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRace {
    pub name: String,
    pub country: String,
    pub date: DateTime<Utc>,
    pub distance: u32,
    pub gender: RaceGender,
}

/// A result row before the store has assigned it an id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRaceStatistic {
    pub race_id: RaceId,
    pub runner_id: RunnerId,
    pub finish_time: Duration,
}

/// A race together with its result rows.
///
/// Presence of any result row is the sole signal that the race has been
/// run; there is no separate status flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceWithResults {
    pub race: Race,
    pub results: Vec<RaceStatistic>,
}

impl RaceWithResults {
    /// Whether the race has already been started (and therefore completed).
    pub fn has_started(&self) -> bool {
        !self.results.is_empty()
    }
}
