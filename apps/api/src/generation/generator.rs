//! Cover letter generation: validate the request, build the prompt, call the model.
//!
//! Flow: validate six fields → fill prompt template → TextModel::generate → return raw text.
//!
//! The model output is returned exactly as received: no trimming, no retry on
//! partial or malformed output.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::COVER_LETTER_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, NO_PLACEHOLDER_INSTRUCTION};
use crate::llm_client::{LlmError, TextModel};
use crate::models::application::{ApplicantProfile, JobTarget};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for cover letter generation.
///
/// Wire shape: `{userName, userEmail, userPhone, resumeText, companyName, position}`.
/// Missing keys deserialize as empty strings and are rejected by validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub profile: ApplicantProfile,
    #[serde(default)]
    pub resume_text: String,
    #[serde(flatten)]
    pub job: JobTarget,
}

impl GenerateRequest {
    /// All six fields must be present. Whitespace counts as present.
    fn is_complete(&self) -> bool {
        [
            &self.resume_text,
            &self.job.company_name,
            &self.job.position,
            &self.profile.name,
            &self.profile.email,
            &self.profile.phone,
        ]
        .iter()
        .all(|field| !field.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

/// The Letter Generation Service. Holds the model behind a trait object so the
/// Gemini client can be replaced in tests.
#[derive(Clone)]
pub struct LetterGenerator {
    model: Arc<dyn TextModel>,
}

impl LetterGenerator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Generates a cover letter draft.
    ///
    /// Errors:
    /// - `Validation` if any required field is empty (no model call is made)
    /// - `Configuration` if the model has no API key
    /// - `Upstream` if the model call itself fails
    pub async fn generate(&self, request: &GenerateRequest) -> Result<String, AppError> {
        if !request.is_complete() {
            return Err(AppError::Validation("Missing required fields".to_string()));
        }

        let prompt = build_cover_letter_prompt(request);
        info!(
            "Generating cover letter: company={:?}, position={:?}, resume_chars={}",
            request.job.company_name,
            request.job.position,
            request.resume_text.chars().count()
        );

        let letter = self.model.generate(&prompt).await.map_err(map_llm_error)?;

        info!("Cover letter generated: {} chars", letter.chars().count());
        Ok(letter)
    }
}

fn map_llm_error(err: LlmError) -> AppError {
    match err {
        LlmError::MissingApiKey => AppError::Configuration(
            "API key not configured. Please add GEMINI_API_KEY to your .env file.".to_string(),
        ),
        LlmError::Api { message, .. } => AppError::Upstream {
            error: "Error calling Gemini API".to_string(),
            details: message,
        },
        other => AppError::Upstream {
            error: "Error calling Gemini API".to_string(),
            details: other.to_string(),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt construction
// ────────────────────────────────────────────────────────────────────────────

/// Fills the cover letter template with the request values.
pub fn build_cover_letter_prompt(request: &GenerateRequest) -> String {
    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("grounding_instruction", GROUNDING_INSTRUCTION),
            ("placeholder_instruction", NO_PLACEHOLDER_INSTRUCTION),
            ("resume_text", request.resume_text.as_str()),
            ("user_name", request.profile.name.as_str()),
            ("user_email", request.profile.email.as_str()),
            ("user_phone", request.profile.phone.as_str()),
            ("company_name", request.job.company_name.as_str()),
            ("position", request.job.position.as_str()),
        ],
    )
}

/// Single-pass `{marker}` substitution.
///
/// Inserted values are never rescanned, so user text that happens to contain
/// `{position}` or similar lands in the prompt literally. Unknown markers are
/// left untouched.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
