//! Race start core: eligibility, result synthesis, ranking, and the
//! guarded start orchestrator

pub mod eligibility;
pub mod ranking;
pub mod simulation;
pub mod starter;

pub use ranking::{RankedResult, RewardCurve};
pub use simulation::{FixedPaceSource, PaceSource, UniformPaceSource};
pub use starter::RaceStarter;
