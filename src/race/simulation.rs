//! Result synthesis for started races
//!
//! There is no measurement device behind this service, so finish times are
//! simulated: each eligible runner gets one independent pace draw per start.
//! The random source sits behind a trait so tests can script exact paces.

use crate::error::{RaceServiceError, Result};
use crate::types::{Race, Runner};
use rand::Rng;
use std::sync::Mutex;
use std::time::Duration;

/// Source of simulated paces, one draw per runner per invocation
pub trait PaceSource: Send + Sync {
    /// Draw one pace in meters per second
    fn draw_pace(&self) -> Result<u32>;
}

/// Pace source drawing uniformly from a half-open integer range
#[derive(Debug, Clone)]
pub struct UniformPaceSource {
    min: u32,
    max: u32,
}

impl UniformPaceSource {
    /// Create a pace source over `[min, max)`
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min == 0 || min >= max {
            return Err(RaceServiceError::ConfigurationError {
                message: format!("Invalid pace range [{}, {})", min, max),
            }
            .into());
        }

        Ok(Self { min, max })
    }
}

impl Default for UniformPaceSource {
    fn default() -> Self {
        Self { min: 14, max: 20 }
    }
}

impl PaceSource for UniformPaceSource {
    fn draw_pace(&self) -> Result<u32> {
        Ok(rand::thread_rng().gen_range(self.min..self.max))
    }
}

/// Pace source replaying a scripted sequence, for deterministic tests
#[derive(Debug, Default)]
pub struct FixedPaceSource {
    paces: Mutex<Vec<u32>>,
}

impl FixedPaceSource {
    /// Create a source that yields the given paces in order
    pub fn new(paces: Vec<u32>) -> Self {
        let mut paces = paces;
        paces.reverse(); // pop() then yields front-to-back
        Self {
            paces: Mutex::new(paces),
        }
    }
}

impl PaceSource for FixedPaceSource {
    fn draw_pace(&self) -> Result<u32> {
        let mut paces = self.paces.lock().map_err(|_| {
            RaceServiceError::InternalError {
                message: "Failed to acquire fixed pace lock".to_string(),
            }
        })?;

        paces.pop().ok_or_else(|| {
            RaceServiceError::InternalError {
                message: "Fixed pace source exhausted".to_string(),
            }
            .into()
        })
    }
}

/// Produce one simulated finish time per eligible runner.
///
/// Units: `race.distance` is in meters, paces are in meters per second, so
/// `finish_time = distance / pace` comes out in seconds. Draws are
/// independent and sampled with replacement; two runners may share a pace,
/// and two invocations for the same race will generally differ. Input order
/// is preserved.
pub fn synthesize_results(
    race: &Race,
    eligible: Vec<Runner>,
    paces: &dyn PaceSource,
) -> Result<Vec<(Runner, Duration)>> {
    let mut results = Vec::with_capacity(eligible.len());

    for runner in eligible {
        let pace = paces.draw_pace()?;
        let finish_time = Duration::from_secs_f64(f64::from(race.distance) / f64::from(pace));
        results.push((runner, finish_time));
    }

    Ok(results)
}
