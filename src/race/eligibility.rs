//! Eligibility filter for race participation

use crate::types::{RaceGender, Runner};

/// Select the runners allowed to compete in a race of the given category.
///
/// General races admit everyone; Male/Female races admit only runners of the
/// matching gender. Pure selection, input order preserved.
pub fn select_eligible(category: RaceGender, runners: Vec<Runner>) -> Vec<Runner> {
    runners
        .into_iter()
        .filter(|runner| category.admits(runner.gender))
        .collect()
}
