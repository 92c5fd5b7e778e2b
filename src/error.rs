use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// errors surfaced by the http handlers as `{"error": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// ingest without `peopleCount` and/or `temperature`
    #[error("Invalid data format. Ensure peopleCount and temperature are provided.")]
    MissingField,

    /// body the json extractor refused (malformed json, wrong content type)
    #[error("{0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
