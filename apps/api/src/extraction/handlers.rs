//! Axum route handler for the Extraction API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    Json,
};
use tracing::{error, info};

use crate::errors::AppError;
use crate::extraction::{extract_text, ExtractedText};

/// Multipart field that carries the uploaded resume.
const FILE_FIELD: &str = "file";

/// POST /api/extract-text
///
/// Accepts a multipart upload with one `file` field and returns `{text, source}`.
/// The declared content type is logged but not enforced.
pub async fn handle_extract_text(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractedText>, AppError> {
    let mut multipart = multipart.map_err(|e| {
        error!("Rejected upload: {e}");
        AppError::Extraction("Failed to process request".to_string())
    })?;

    loop {
        let field = multipart.next_field().await.map_err(|e| {
            error!("Error processing upload: {e}");
            AppError::Extraction("Failed to process request".to_string())
        })?;

        let Some(field) = field else {
            return Err(AppError::Validation("No file provided".to_string()));
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("unnamed").to_string();
        let content_type = field.content_type().unwrap_or("unknown").to_string();

        let bytes = field.bytes().await.map_err(|e| {
            error!("Error extracting text from {file_name}: {e}");
            AppError::Extraction("Failed to extract text".to_string())
        })?;

        let extracted = extract_text(&bytes);
        info!(
            "Extracted {} chars from {file_name} ({content_type}, {} bytes)",
            extracted.text.len(),
            bytes.len()
        );
        return Ok(Json(extracted));
    }
}
