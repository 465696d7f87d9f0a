pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers::handle_extract_text;
use crate::generation::handlers::handle_generate;
use crate::render::handlers::handle_render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/env-check", get(health::env_check_handler))
        // Extract → Generate → Render, one round trip each
        .route("/api/extract-text", post(handle_extract_text))
        .route("/api/generate", post(handle_generate))
        .route("/api/render", post(handle_render))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
