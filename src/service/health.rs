//! Health check reporting
//!
//! This module provides health check functionality for the raceday service,
//! used by the HTTP health endpoint and the CLI health-check mode.

use crate::error::Result;
use crate::service::app::AppState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Overall service status
    pub status: HealthStatus,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Registry statistics
    pub stats: RegistryStats,
}

/// Registry statistics for health reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Number of registered runners
    pub runners: usize,
    /// Number of registered races
    pub races: usize,
    /// Service uptime in seconds
    pub uptime_seconds: i64,
}

impl HealthCheck {
    /// Perform a health check of the service
    ///
    /// Unhealthy means the record store could not answer; there are no other
    /// runtime dependencies.
    pub async fn check(app_state: Arc<AppState>) -> Result<Self> {
        let store = app_state.store();
        let (status, runners, races) =
            match (store.runner_count().await, store.race_count().await) {
                (Ok(runners), Ok(races)) => (HealthStatus::Healthy, runners, races),
                _ => (HealthStatus::Unhealthy, 0, 0),
            };

        let now = chrono::Utc::now();

        Ok(HealthCheck {
            status,
            service: app_state.config().service.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: now,
            stats: RegistryStats {
                runners,
                races,
                uptime_seconds: (now - app_state.started_at()).num_seconds(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::types::{Gender, NewRunner};

    #[tokio::test]
    async fn test_health_check_reports_registry_counts() {
        let state = Arc::new(AppState::new(AppConfig::default()).unwrap());

        state
            .store()
            .insert_runner(NewRunner {
                name: "Eliud".to_string(),
                country: "KE".to_string(),
                gender: Gender::Male,
            })
            .await
            .unwrap();

        let health = HealthCheck::check(state).await.unwrap();
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.stats.runners, 1);
        assert_eq!(health.stats.races, 0);
        assert_eq!(health.service, "raceday");
    }
}
