//! HTTP adapter for the raceday service using Axum
//!
//! A thin transport layer over the core: one operation endpoint to start a
//! race, seed endpoints for runners and races, and a health endpoint. Field
//! validation, pagination, and authentication are intentionally absent.

use crate::error::{RaceServiceError, Result};
use crate::service::app::AppState;
use crate::service::health::HealthCheck;
use crate::types::{NewRace, NewRunner, RaceId};
use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// HTTP server that exposes the service endpoints
pub struct HttpServer {
    port: u16,
    app_state: Arc<AppState>,
    shutdown_tx: broadcast::Sender<()>,
}

impl HttpServer {
    /// Create a new HTTP server for the given application state
    pub fn new(port: u16, app_state: Arc<AppState>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            port,
            app_state,
            shutdown_tx,
        }
    }

    /// Start serving; returns when a shutdown signal is sent
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = format!("0.0.0.0:{}", self.port)
            .parse()
            .context("Invalid HTTP server address")?;

        let app = create_router(self.app_state.clone());
        let listener = TcpListener::bind(addr).await?;

        info!("HTTP server listening on http://{}", addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("HTTP server shutdown signal received");
            })
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Stop the HTTP server
    pub fn stop(&self) {
        if let Err(e) = self.shutdown_tx.send(()) {
            warn!("Failed to send shutdown signal to HTTP server: {}", e);
        }
    }
}

/// Create the Axum router with all service endpoints
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/runners", post(create_runner_handler))
        .route("/races", post(create_race_handler))
        .route("/races/{id}/start", post(start_race_handler))
        .with_state(app_state)
}

/// Root endpoint handler - shows service information
async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "service": "raceday",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/health",
            "/runners",
            "/races",
            "/races/{id}/start"
        ]
    }))
}

/// Health check endpoint handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Health check requested");

    match HealthCheck::check(state).await {
        Ok(health) => (StatusCode::OK, Json(json!(health))),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unhealthy", "error": e.to_string() })),
        ),
    }
}

/// Register a new runner
async fn create_runner_handler(
    State(state): State<Arc<AppState>>,
    Json(runner): Json<NewRunner>,
) -> impl IntoResponse {
    match state.store().insert_runner(runner).await {
        Ok(runner) => (StatusCode::CREATED, Json(json!(runner))),
        Err(e) => error_response(e),
    }
}

/// Register a new race
async fn create_race_handler(
    State(state): State<Arc<AppState>>,
    Json(race): Json<NewRace>,
) -> impl IntoResponse {
    match state.store().insert_race(race).await {
        Ok(race) => (StatusCode::CREATED, Json(json!(race))),
        Err(e) => error_response(e),
    }
}

/// Start a race and return it with its freshly created results
async fn start_race_handler(
    State(state): State<Arc<AppState>>,
    Path(race_id): Path<RaceId>,
) -> impl IntoResponse {
    info!("Start requested for race {}", race_id);

    match state.starter().start_race(race_id).await {
        Ok(started) => (StatusCode::OK, Json(json!(started))),
        Err(e) => error_response(e),
    }
}

/// Map core errors onto HTTP statuses so callers can tell the failure kinds
/// apart: absent resource, state conflict, unmet precondition, or a storage
/// fault worth retrying later.
fn error_response(error: anyhow::Error) -> (StatusCode, Json<serde_json::Value>) {
    let status = match error.downcast_ref::<RaceServiceError>() {
        Some(RaceServiceError::RaceNotFound { .. }) => StatusCode::NOT_FOUND,
        Some(RaceServiceError::RaceAlreadyStarted { .. }) => StatusCode::CONFLICT,
        Some(RaceServiceError::NoEligibleRunners { .. }) => StatusCode::PRECONDITION_FAILED,
        Some(RaceServiceError::StorageFailure { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    warn!("Request failed with {}: {}", status, error);

    (status, Json(json!({ "error": error.to_string() })))
}
