pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::theme::handlers;

/// Uploads beyond this are rejected before any extraction work happens.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Theme API
        .route("/api/v1/themes/extract", post(handlers::handle_extract))
        .route(
            "/api/v1/themes/extract-text",
            post(handlers::handle_extract_text),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
