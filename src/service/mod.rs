//! Service wiring: application state, health checks, and the HTTP adapter

pub mod app;
pub mod health;
pub mod http;

pub use app::AppState;
pub use health::{HealthCheck, HealthStatus};
pub use http::HttpServer;
