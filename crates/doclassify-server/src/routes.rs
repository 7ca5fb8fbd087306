//! Router configuration for the web server.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let classify = Router::new()
        .route("/classify_file", post(handlers::classify_file))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::enforce_rate_limit,
        ))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes));

    Router::new()
        // Health check for container orchestration
        .route("/health", get(handlers::health))
        .merge(classify)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
