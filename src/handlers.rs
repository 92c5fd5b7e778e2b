use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{Html, IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::dashboard;
use crate::domain::{IngestPayload, IngestResponse, Reading, ResetResponse, RoomStatus};
use crate::error::ApiError;
use crate::AppState;

/// POST /update
///
/// replaces the stored reading with the two supplied fields. a body missing
/// either field is rejected and the stored reading is left untouched.
pub async fn ingest(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<IngestResponse>, ApiError> {
    let body = match body {
        Ok(Json(body)) => body,
        // a device that forgets the content type sent no readable fields
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Null,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected ingest body");
            return Err(ApiError::InvalidBody(rejection.body_text()));
        }
    };

    let Some(reading) = IngestPayload::from_body(body).into_reading() else {
        tracing::warn!("rejected ingest: missing peopleCount or temperature");
        return Err(ApiError::MissingField);
    };

    if state.show_readings {
        tracing::info!(
            people_count = %reading.people_count,
            temperature = %reading.temperature,
            "received reading"
        );
    } else {
        tracing::debug!(
            people_count = %reading.people_count,
            temperature = %reading.temperature,
            "received reading"
        );
    }

    let status = RoomStatus {
        people_in_room: reading.people_count.clone(),
        temperature: reading.temperature.clone(),
    };
    state.latest.set(reading).await;

    Ok(Json(IngestResponse {
        message: "Data received successfully".to_string(),
        status,
    }))
}

/// POST /reset
pub async fn reset(State(state): State<AppState>) -> Json<ResetResponse> {
    let latest_data = state.latest.reset().await;
    tracing::info!("reading reset to zero");
    Json(ResetResponse {
        message: "Data has been reset.".to_string(),
        latest_data,
    })
}

/// GET /data - current reading for the dashboard poller
pub async fn latest(State(state): State<AppState>) -> Json<Reading> {
    Json(state.latest.get().await)
}

/// GET / - live dashboard, rendered once at startup
pub async fn dashboard_page(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Html(state.dashboard.to_string()),
    )
}

/// GET /static - server-rendered snapshot for browsers without javascript
pub async fn snapshot_page(State(state): State<AppState>) -> impl IntoResponse {
    let reading = state.latest.get().await;
    (
        [(header::CACHE_CONTROL, "no-store")],
        Html(dashboard::render_static(&reading)),
    )
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
