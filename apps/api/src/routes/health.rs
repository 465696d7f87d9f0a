use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "coverdraft-api"
    }))
}

/// GET /api/env-check
/// Reports whether the model credential is configured. Never echoes the key.
pub async fn env_check_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Environment check",
        "environment": {
            "GEMINI_API_KEY_EXISTS": state.config.has_gemini_key(),
            "MODEL": llm_client::MODEL,
            "PROFILE": if cfg!(debug_assertions) { "debug" } else { "release" },
        }
    }))
}
