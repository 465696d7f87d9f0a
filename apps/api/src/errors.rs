use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The response body is `{"error": <message>, "code": <tag>, "details"?: <upstream>}`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad input caught before any external call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Axum rejected the JSON body. Keeps the rejection's status (400, 413, 415, 422).
    #[error("{error}: {details}")]
    Rejected {
        status: StatusCode,
        error: String,
        details: String,
    },

    /// The uploaded payload could not be read or decoded.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The service is missing something it needs from its environment.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The external model call failed. `details` carries the upstream message.
    #[error("{error}: {details}")]
    Upstream { error: String, details: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None),
            AppError::Rejected {
                status,
                error,
                details,
            } => {
                tracing::warn!("Rejected request body: {details}");
                (status, "INVALID_REQUEST", error, Some(details))
            }
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "EXTRACTION_ERROR", msg, None)
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR", msg, None)
            }
            AppError::Upstream { error, details } => {
                tracing::error!("Upstream error: {error}: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    error,
                    Some(details),
                )
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Failed to render document".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        (status, Json(error_body(&message, code, details.as_deref()))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            error: "Invalid request body".to_string(),
            details: rejection.body_text(),
        }
    }
}

fn error_body(message: &str, code: &str, details: Option<&str>) -> Value {
    let mut body = json!({
        "error": message,
        "code": code,
    });
    if let Some(details) = details {
        body["details"] = Value::String(details.to_string());
    }
    body
}
