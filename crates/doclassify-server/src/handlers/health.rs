use axum::{extract::State, response::IntoResponse, Json};

use super::api_types::HealthResponse;
use crate::AppState;

/// Liveness check that also reports whether the statistical model is loaded.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        model_loaded: state.pipeline.model().is_loaded(),
    })
}
