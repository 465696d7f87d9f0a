// Document Renderer
// Implements: typed block layout, Helvetica line wrapping, PDF assembly.
// CPU-bound rendering runs inside tokio::task::spawn_blocking (see handlers).

pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod pdf;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::models::application::{ApplicantProfile, JobTarget};
use crate::render::layout::compose_letter;
use crate::render::pdf::{write_pdf, RenderError};

/// Request body for rendering. Profile fields fall back to sample values when
/// the key is absent; an explicitly empty string is rendered as empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub cover_letter: String,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_phone: Option<String>,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub position: String,
}

impl RenderRequest {
    pub fn profile(&self) -> ApplicantProfile {
        ApplicantProfile {
            name: self.user_name.clone().unwrap_or_else(|| "Your Name".to_string()),
            email: self
                .user_email
                .clone()
                .unwrap_or_else(|| "your.email@example.com".to_string()),
            phone: self.user_phone.clone().unwrap_or_else(|| "123-456-7890".to_string()),
        }
    }

    pub fn job(&self) -> JobTarget {
        JobTarget {
            company_name: self.company_name.clone(),
            position: self.position.clone(),
        }
    }
}

/// The downloadable document. Built per request, never cached.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Renders the letter dated `date`.
pub fn render_cover_letter(
    request: &RenderRequest,
    date: NaiveDate,
) -> Result<RenderedArtifact, RenderError> {
    let job = request.job();
    let layout = compose_letter(&request.cover_letter, &request.profile(), &job, date);
    debug!("Laid out {} body paragraphs", layout.paragraphs().len());
    let filename = artifact_filename(&job.company_name, &job.position);
    let bytes = write_pdf(&layout, &filename)?;
    Ok(RenderedArtifact { filename, bytes })
}

/// `Cover_Letter_{company}_{position}.pdf`, each whitespace run replaced by `_`.
pub fn artifact_filename(company_name: &str, position: &str) -> String {
    format!(
        "Cover_Letter_{}_{}.pdf",
        underscore_whitespace(company_name),
        underscore_whitespace(position)
    )
}

fn underscore_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
