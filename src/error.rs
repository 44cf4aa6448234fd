//! Error types for the race registry service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

use crate::types::RaceId;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific race registry scenarios
#[derive(Debug, thiserror::Error)]
pub enum RaceServiceError {
    #[error("Race not found: {race_id}")]
    RaceNotFound { race_id: RaceId },

    #[error("Race has already started: {race_id}")]
    RaceAlreadyStarted { race_id: RaceId },

    #[error("No eligible runners for race: {race_id}")]
    NoEligibleRunners { race_id: RaceId },

    #[error("Storage failure: {message}")]
    StorageFailure { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}
