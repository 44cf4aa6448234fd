//! Ranking and rating rewards
//!
//! Orders a race's synthesized results by finish time and pays each runner an
//! exponentially decaying reward for their rank.

use crate::error::{RaceServiceError, Result};
use crate::types::Runner;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reward curve parameters: rank `i` (zero-based) is worth
/// `floor(base * e^(-decay * i))` rating points.
///
/// At the defaults this pays 50 to the winner, 0 from rank 2 on; only the top
/// of the field is rewarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardCurve {
    pub base: f64,
    pub decay: f64,
}

impl Default for RewardCurve {
    fn default() -> Self {
        Self {
            base: 50.0,
            decay: 5.0,
        }
    }
}

impl RewardCurve {
    /// Validate curve parameters
    pub fn validate(&self) -> Result<()> {
        if self.base <= 0.0 || !self.base.is_finite() {
            return Err(RaceServiceError::ConfigurationError {
                message: "Reward base must be positive and finite".to_string(),
            }
            .into());
        }

        if self.decay < 0.0 || !self.decay.is_finite() {
            return Err(RaceServiceError::ConfigurationError {
                message: "Reward decay must be non-negative and finite".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Rating points awarded at a zero-based rank; never negative.
    pub fn reward_for_rank(&self, rank: usize) -> i64 {
        (self.base * (-self.decay * rank as f64).exp()).floor() as i64
    }
}

/// One runner's ranked outcome in a race
#[derive(Debug, Clone)]
pub struct RankedResult {
    /// The runner with the rank reward already applied to their rating
    pub runner: Runner,
    pub finish_time: Duration,
    /// Zero-based rank, fastest first
    pub rank: usize,
    /// Rating points awarded at this rank
    pub reward: i64,
}

/// Rank results by ascending finish time and apply rating rewards.
///
/// The sort is stable, so runners with equal finish times keep their input
/// order; no secondary tie-break key is defined. Ratings accumulate: the
/// reward is added onto whatever the runner had coming in.
pub fn rank_and_reward(
    results: Vec<(Runner, Duration)>,
    curve: &RewardCurve,
) -> Vec<RankedResult> {
    let mut results = results;
    results.sort_by_key(|(_, finish_time)| *finish_time);

    results
        .into_iter()
        .enumerate()
        .map(|(rank, (mut runner, finish_time))| {
            let reward = curve.reward_for_rank(rank);
            runner.rating += reward;

            RankedResult {
                runner,
                finish_time,
                rank,
                reward,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Gender;
    use proptest::prelude::*;

    fn runner(id: i64, rating: i64) -> Runner {
        Runner {
            id,
            name: format!("runner-{}", id),
            country: "ET".to_string(),
            gender: Gender::Female,
            rating,
        }
    }

    #[test]
    fn test_default_curve_values() {
        let curve = RewardCurve::default();
        assert_eq!(curve.reward_for_rank(0), 50);
        assert_eq!(curve.reward_for_rank(1), 0); // floor(50 * e^-5) = floor(0.336..)
        assert_eq!(curve.reward_for_rank(2), 0);
        assert_eq!(curve.reward_for_rank(100), 0);
    }

    #[test]
    fn test_curve_validation() {
        assert!(RewardCurve::default().validate().is_ok());
        assert!(RewardCurve {
            base: 0.0,
            decay: 5.0
        }
        .validate()
        .is_err());
        assert!(RewardCurve {
            base: 50.0,
            decay: -1.0
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_fastest_runner_ranks_first_and_collects_the_reward() {
        let results = vec![
            (runner(1, 0), Duration::from_secs(700)),
            (runner(2, 0), Duration::from_secs(500)),
            (runner(3, 0), Duration::from_secs(600)),
        ];

        let ranked = rank_and_reward(results, &RewardCurve::default());

        assert_eq!(ranked[0].runner.id, 2);
        assert_eq!(ranked[1].runner.id, 3);
        assert_eq!(ranked[2].runner.id, 1);

        assert_eq!(ranked[0].rank, 0);
        assert_eq!(ranked[0].reward, 50);
        assert_eq!(ranked[0].runner.rating, 50);
        assert_eq!(ranked[1].runner.rating, 0);
        assert_eq!(ranked[2].runner.rating, 0);
    }

    #[test]
    fn test_rewards_accumulate_on_existing_ratings() {
        let results = vec![(runner(1, 120), Duration::from_secs(500))];
        let ranked = rank_and_reward(results, &RewardCurve::default());
        assert_eq!(ranked[0].runner.rating, 170);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let results = vec![
            (runner(1, 0), Duration::from_secs(500)),
            (runner(2, 0), Duration::from_secs(500)),
        ];

        let ranked = rank_and_reward(results, &RewardCurve::default());
        assert_eq!(ranked[0].runner.id, 1);
        assert_eq!(ranked[1].runner.id, 2);
    }

    proptest! {
        /// Rewards never increase with rank, for any reasonable curve.
        #[test]
        fn prop_rewards_are_monotonically_non_increasing(
            base in 0.1f64..10_000.0,
            decay in 0.0f64..20.0,
            field_size in 1usize..64,
        ) {
            let curve = RewardCurve { base, decay };
            for rank in 0..field_size.saturating_sub(1) {
                prop_assert!(curve.reward_for_rank(rank) >= curve.reward_for_rank(rank + 1));
            }
        }

        /// Rewards are never negative, so ratings can only grow.
        #[test]
        fn prop_rewards_are_never_negative(rank in 0usize..1_000) {
            let curve = RewardCurve::default();
            prop_assert!(curve.reward_for_rank(rank) >= 0);
        }
    }
}
