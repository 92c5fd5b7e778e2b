//! ==============================================================================
//! main.rs - room telemetry entry point
//! ==============================================================================
//!
//! purpose:
//!     runs one of two roles, picked by `role` in telemetry.toml (or the
//!     TELEMETRY_ROLE env var):
//!     - server: accepts readings from the sensor device and serves the
//!       json api plus the live dashboard
//!     - monitor: polls a running server from the terminal
//!
//! relationships:
//!     - uses: config.rs (startup configuration)
//!     - uses: lib.rs (router + shared state)
//!     - uses: monitor.rs (monitor role)
//!
//! ==============================================================================

use anyhow::{Context, Result};
use room_telemetry::config::{Role, TelemetryConfig};
use room_telemetry::monitor::Monitor;
use room_telemetry::{build_router, AppState};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // startup banner
    println!("===========================================================");
    println!("  Room Telemetry - occupancy & temperature");
    println!("===========================================================");

    // step 1: load configuration
    let config = TelemetryConfig::load_or_default();
    config.print_summary();

    // step 2: logging (RUST_LOG wins over the configured level)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // step 3: run the selected role
    match config.role {
        Role::Server => run_server(&config).await,
        Role::Monitor => {
            let monitor = Monitor::new(
                &config.monitor.server_url,
                Duration::from_millis(config.monitor.interval_ms),
            )?;
            monitor.run().await
        }
    }
}

// ==============================================================================
// web server
// ==============================================================================

async fn run_server(config: &TelemetryConfig) -> Result<()> {
    let state = AppState::from_config(config);
    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("dashboard live at http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("web server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
