//! Configuration management for the raceday service
//!
//! This module handles all configuration loading from environment variables,
//! validation, and default values for the race registry service.

pub mod app;
pub mod simulation;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use simulation::{RewardSettings, SimulationSettings};
