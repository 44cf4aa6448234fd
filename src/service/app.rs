//! Main application state and service wiring
//!
//! This module builds the production object graph: the record store, the
//! pace source, and the race starter, all driven by the loaded configuration.

use crate::config::AppConfig;
use crate::error::Result;
use crate::race::{RaceStarter, RewardCurve, UniformPaceSource};
use crate::store::{InMemoryRecordStore, RecordStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Shared application state
pub struct AppState {
    config: AppConfig,
    store: Arc<dyn RecordStore>,
    starter: Arc<RaceStarter>,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Build the application state from configuration with the in-memory
    /// record store
    pub fn new(config: AppConfig) -> Result<Self> {
        let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
        Self::with_store(config, store)
    }

    /// Build the application state around an existing record store
    pub fn with_store(config: AppConfig, store: Arc<dyn RecordStore>) -> Result<Self> {
        let paces = Arc::new(UniformPaceSource::new(
            config.simulation.pace_min,
            config.simulation.pace_max,
        )?);
        let reward = RewardCurve {
            base: config.reward.base,
            decay: config.reward.decay,
        };

        let starter = Arc::new(RaceStarter::new(store.clone(), paces, reward)?);

        info!(
            "Application state initialized - pace range [{}, {}), reward base {}",
            config.simulation.pace_min, config.simulation.pace_max, config.reward.base
        );

        Ok(Self {
            config,
            store,
            starter,
            started_at: Utc::now(),
        })
    }

    /// Service configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The record store
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// The race start orchestrator
    pub fn starter(&self) -> &Arc<RaceStarter> {
        &self.starter
    }

    /// When this service instance was started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
