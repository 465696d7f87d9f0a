use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const PDF_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobTarget {
    pub company_name: String,
    pub position: String,
}

/// A file picked by the user, with the MIME type the picker declared.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case(PDF_MIME_TYPE)
    }
}

/// The PDF returned by the render endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub filename: String,
    pub bytes: Bytes,
}

// ── Wire shapes ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ExtractResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateBody<'a> {
    pub user_name: &'a str,
    pub user_email: &'a str,
    pub user_phone: &'a str,
    pub resume_text: &'a str,
    pub company_name: &'a str,
    pub position: &'a str,
}

impl<'a> GenerateBody<'a> {
    pub fn new(profile: &'a ApplicantProfile, resume_text: &'a str, job: &'a JobTarget) -> Self {
        Self {
            user_name: &profile.name,
            user_email: &profile.email,
            user_phone: &profile.phone,
            resume_text,
            company_name: &job.company_name,
            position: &job.position,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    pub cover_letter: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RenderBody<'a> {
    pub cover_letter: &'a str,
    pub user_name: &'a str,
    pub user_email: &'a str,
    pub user_phone: &'a str,
    pub company_name: &'a str,
    pub position: &'a str,
}

impl<'a> RenderBody<'a> {
    pub fn new(cover_letter: &'a str, profile: &'a ApplicantProfile, job: &'a JobTarget) -> Self {
        Self {
            cover_letter,
            user_name: &profile.name,
            user_email: &profile.email,
            user_phone: &profile.phone,
            company_name: &job.company_name,
            position: &job.position,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}
