//! JSON bodies returned by the API.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use doclassify::ClassificationResult;

/// Error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn with_status(status: StatusCode, message: impl Into<String>) -> impl IntoResponse {
        (
            status,
            Json(ErrorResponse {
                error: message.into(),
            }),
        )
    }
}

/// Successful classification: `{"file_class": "invoice"}`.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub file_class: ClassificationResult,
}

/// Returned by `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}

pub fn bad_request(message: impl Into<String>) -> impl IntoResponse {
    ErrorResponse::with_status(StatusCode::BAD_REQUEST, message)
}
