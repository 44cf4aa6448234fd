//! Race simulation and reward configuration

use serde::{Deserialize, Serialize};

/// Settings for the simulated pace draw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Lower bound of the pace draw in meters per second (inclusive)
    pub pace_min: u32,
    /// Upper bound of the pace draw in meters per second (exclusive)
    pub pace_max: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            pace_min: 14,
            pace_max: 20,
        }
    }
}

/// Settings for the rank reward curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardSettings {
    /// Rating points paid to the winner
    pub base: f64,
    /// Exponential decay per rank
    pub decay: f64,
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            base: 50.0,
            decay: 5.0,
        }
    }
}
