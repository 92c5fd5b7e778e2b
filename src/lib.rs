//! ==============================================================================
//! lib.rs - room telemetry service
//! ==============================================================================
//!
//! purpose:
//!     a sensor device posts its latest occupancy + temperature reading,
//!     the server keeps only that one reading and hands it back as json
//!     and through an auto-refreshing dashboard.
//!
//! relationships:
//!     - state.rs: the single latest-reading slot
//!     - handlers.rs: http operations over that slot
//!     - dashboard.rs: html for `/` and `/static`
//!     - monitor.rs: terminal client that polls `/data`
//!     - config.rs: telemetry.toml + env overrides
//!
//! ```text
//!     ┌──────────────┐  POST /update   ┌──────────────────────────┐
//!     │ sensor device│ ──────────────> │ router (handlers.rs)     │
//!     └──────────────┘                 │   ┌──────────────────┐   │
//!     ┌──────────────┐  GET /data      │   │ LatestReading    │   │
//!     │ dashboard js │ <────────────── │   │ (state.rs)       │   │
//!     │ / monitor    │                 │   └──────────────────┘   │
//!     └──────────────┘                 └──────────────────────────┘
//! ```
//!
//! ==============================================================================

pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod monitor;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::LatestReading;

/// shared handler state, cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub latest: LatestReading,
    /// live dashboard document, rendered once at startup
    pub dashboard: Arc<str>,
    /// log ingested values at info (otherwise debug)
    pub show_readings: bool,
}

impl AppState {
    pub fn new(poll_interval_ms: u64, show_readings: bool) -> Self {
        Self {
            latest: LatestReading::new(),
            dashboard: Arc::from(dashboard::render_live(poll_interval_ms)),
            show_readings,
        }
    }

    pub fn from_config(config: &config::TelemetryConfig) -> Self {
        Self::new(config.dashboard.poll_interval_ms, config.logging.show_readings)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/static", get(handlers::snapshot_page))
        .route("/data", get(handlers::latest))
        .route("/update", post(handlers::ingest))
        .route("/reset", post(handlers::reset))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
