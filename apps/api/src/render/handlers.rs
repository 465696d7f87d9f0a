//! Axum route handler for the Render API.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::render::{render_cover_letter, RenderRequest};

/// POST /api/render
///
/// Lays the (possibly user-edited) letter out as a PDF dated today and returns
/// it as an attachment named after the company and position.
pub async fn handle_render(
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let today = chrono::Local::now().date_naive();

    let artifact = tokio::task::spawn_blocking(move || render_cover_letter(&request, today))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Render task failed: {e}")))?
        .map_err(|e| AppError::Render(e.to_string()))?;

    info!(
        "Rendered {} ({} bytes)",
        artifact.filename,
        artifact.bytes.len()
    );

    let disposition = HeaderValue::from_str(&content_disposition(&artifact.filename))
        .map_err(|e| AppError::Render(format!("Invalid filename header: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}

/// `attachment; filename="<ascii>"; filename*=UTF-8''<percent-encoded>`
///
/// The quoted form is restricted to printable ASCII without `"` or `\`; the
/// extended form carries the exact name.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            ' '..='~' => c,
            _ => '_',
        })
        .collect();

    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}
