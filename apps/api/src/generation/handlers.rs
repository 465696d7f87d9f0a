//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::generator::GenerateRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub cover_letter: String,
}

/// POST /api/generate
///
/// Drafts a cover letter from the applicant profile, job target and resume text.
/// Returns the model output unmodified as `{coverLetter}`. A body axum cannot
/// decode still gets the JSON error shape.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload?;
    let cover_letter = state.generator.generate(&request).await?;
    Ok(Json(GenerateResponse { cover_letter }))
}
