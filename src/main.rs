//! Main entry point for the raceday service
//!
//! Initializes configuration, logging, and the application state, then serves
//! the HTTP API until a shutdown signal arrives.

use anyhow::Result;
use clap::Parser;
use raceday::config::AppConfig;
use raceday::service::{AppState, HealthCheck, HealthStatus, HttpServer};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// Raceday - runner and race registry with simulated race starts
#[derive(Parser)]
#[command(
    name = "raceday",
    version,
    about = "A runner and race registry service with simulated race starts and rating rewards"
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Perform health check and exit
    #[arg(long, help = "Perform a health check and exit with status code")]
    health_check: bool,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// HTTP port override
    #[arg(long, value_name = "PORT", help = "Override HTTP server port")]
    http_port: Option<u16>,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without starting service"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if let Some(http_port) = args.http_port {
        config.service.http_port = http_port;
    }

    Ok(config)
}

/// Perform a health check against a fresh application state and exit
async fn perform_health_check(config: AppConfig) -> Result<()> {
    let app_state = Arc::new(AppState::new(config)?);

    match HealthCheck::check(app_state).await {
        Ok(health) => {
            println!("Health Check: {}", health.status);
            println!("  Runners: {}", health.stats.runners);
            println!("  Races: {}", health.stats.races);

            if health.status == HealthStatus::Healthy {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("Health check failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C) signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.health_check {
        return perform_health_check(config).await;
    }

    info!("Raceday service starting");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   HTTP port: {}", config.service.http_port);
    info!(
        "   Pace range: [{}, {}) m/s",
        config.simulation.pace_min, config.simulation.pace_max
    );

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Dry run completed - exiting without starting service");
        return Ok(());
    }

    let app_state = match AppState::new(config.clone()) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let http_server = Arc::new(HttpServer::new(config.service.http_port, app_state));
    let server_task = {
        let http_server = http_server.clone();
        tokio::spawn(async move {
            if let Err(e) = http_server.start().await {
                error!("HTTP server error: {}", e);
            }
        })
    };

    info!("Raceday service is running, press Ctrl+C to shut down");

    wait_for_shutdown_signal().await;

    info!("Shutdown signal received, stopping HTTP server...");
    http_server.stop();

    match tokio::time::timeout(config.shutdown_timeout(), server_task).await {
        Ok(_) => info!("Graceful shutdown completed"),
        Err(_) => error!("Shutdown timeout exceeded, forcing exit"),
    }

    info!("Raceday service stopped");
    Ok(())
}
