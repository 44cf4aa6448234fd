//! Main application configuration
//!
//! This module defines the primary configuration structures for the raceday
//! service, including environment variable loading and validation.

use crate::config::simulation::{RewardSettings, SimulationSettings};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub reward: RewardSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Port for the HTTP API
    pub http_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "raceday".to_string(),
            log_level: "info".to_string(),
            http_port: 8080,
            shutdown_timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(port) = env::var("HTTP_PORT") {
            config.service.http_port = port
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT value: {}", port))?;
        }
        if let Ok(timeout) = env::var("SHUTDOWN_TIMEOUT_SECONDS") {
            config.service.shutdown_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid SHUTDOWN_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        // Simulation settings
        if let Ok(pace_min) = env::var("PACE_MIN") {
            config.simulation.pace_min = pace_min
                .parse()
                .map_err(|_| anyhow!("Invalid PACE_MIN value: {}", pace_min))?;
        }
        if let Ok(pace_max) = env::var("PACE_MAX") {
            config.simulation.pace_max = pace_max
                .parse()
                .map_err(|_| anyhow!("Invalid PACE_MAX value: {}", pace_max))?;
        }

        // Reward settings
        if let Ok(base) = env::var("REWARD_BASE") {
            config.reward.base = base
                .parse()
                .map_err(|_| anyhow!("Invalid REWARD_BASE value: {}", base))?;
        }
        if let Ok(decay) = env::var("REWARD_DECAY") {
            config.reward.decay = decay
                .parse()
                .map_err(|_| anyhow!("Invalid REWARD_DECAY value: {}", decay))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;

        let config: Self = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", path.as_ref().display())
        })?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Graceful shutdown timeout as a duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }
}

/// Validate a loaded configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.service.name.is_empty() {
        return Err(anyhow!("Service name must not be empty"));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.service.log_level.as_str()) {
        return Err(anyhow!(
            "Invalid log level '{}', expected one of {:?}",
            config.service.log_level,
            valid_levels
        ));
    }

    if config.simulation.pace_min == 0 || config.simulation.pace_min >= config.simulation.pace_max {
        return Err(anyhow!(
            "Invalid pace range [{}, {})",
            config.simulation.pace_min,
            config.simulation.pace_max
        ));
    }

    if config.reward.base <= 0.0 || !config.reward.base.is_finite() {
        return Err(anyhow!("Reward base must be positive and finite"));
    }
    if config.reward.decay < 0.0 || !config.reward.decay.is_finite() {
        return Err(anyhow!("Reward decay must be non-negative and finite"));
    }

    Ok(())
}
