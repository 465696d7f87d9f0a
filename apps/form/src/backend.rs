//! The seam between the form and the API.

use async_trait::async_trait;
use reqwest::{header, multipart, Client, Response};
use tracing::{debug, warn};

use crate::error::BackendError;
use crate::types::{
    ApplicantProfile, ErrorBody, ExtractResponse, GenerateBody, GenerateResponse, JobTarget,
    RenderBody, RenderedArtifact, SelectedFile,
};

/// The three round trips the form makes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LetterBackend: Send + Sync {
    /// Uploads the resume and returns its extracted text.
    async fn extract(&self, file: &SelectedFile) -> Result<String, BackendError>;

    /// Drafts a cover letter.
    async fn generate(
        &self,
        profile: &ApplicantProfile,
        resume_text: &str,
        job: &JobTarget,
    ) -> Result<String, BackendError>;

    /// Renders `cover_letter` as a PDF.
    async fn render(
        &self,
        cover_letter: &str,
        profile: &ApplicantProfile,
        job: &JobTarget,
    ) -> Result<RenderedArtifact, BackendError>;
}

/// [`LetterBackend`] over HTTP against the coverdraft API.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl LetterBackend for HttpBackend {
    async fn extract(&self, file: &SelectedFile) -> Result<String, BackendError> {
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let form = multipart::Form::new().part("file", part);

        debug!("Uploading {} ({} bytes)", file.name, file.bytes.len());
        let response = self
            .client
            .post(self.url("/api/extract-text"))
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response, "Failed to extract text from PDF").await?;

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(body.text)
    }

    async fn generate(
        &self,
        profile: &ApplicantProfile,
        resume_text: &str,
        job: &JobTarget,
    ) -> Result<String, BackendError> {
        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(&GenerateBody::new(profile, resume_text, job))
            .send()
            .await?;
        let response = check_status(response, "Failed to generate cover letter").await?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(body.cover_letter)
    }

    async fn render(
        &self,
        cover_letter: &str,
        profile: &ApplicantProfile,
        job: &JobTarget,
    ) -> Result<RenderedArtifact, BackendError> {
        let response = self
            .client
            .post(self.url("/api/render"))
            .json(&RenderBody::new(cover_letter, profile, job))
            .send()
            .await?;
        let response = check_status(response, "Failed to generate PDF").await?;

        let filename = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_filename)
            .unwrap_or_else(|| {
                warn!("Render response had no filename, deriving one locally");
                fallback_filename(job)
            });
        let bytes = response.bytes().await?;

        Ok(RenderedArtifact { filename, bytes })
    }
}

/// Turns a non-2xx response into [`BackendError::Api`], reading `{error, details}`
/// from the body when the server sent one.
async fn check_status(response: Response, fallback: &str) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    warn!("API returned {status}: {text}");

    Err(BackendError::api(
        status.as_u16(),
        body.error.unwrap_or_else(|| fallback.to_string()),
        body.details,
    ))
}

/// Reads the quoted `filename="…"` parameter of a Content-Disposition value.
fn disposition_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// Same name the server derives: every whitespace run becomes one `_`,
/// including runs at either end.
fn fallback_filename(job: &JobTarget) -> String {
    let underscored = |s: &str| {
        let mut out = String::with_capacity(s.len());
        let mut in_run = false;
        for c in s.chars() {
            if !c.is_whitespace() {
                out.push(c);
            } else if !in_run {
                out.push('_');
            }
            in_run = c.is_whitespace();
        }
        out
    };
    format!(
        "Cover_Letter_{}_{}.pdf",
        underscored(&job.company_name),
        underscored(&job.position)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_filename_prefers_quoted_form() {
        let value = "attachment; filename=\"Cover_Letter_Acme_Analyst.pdf\"; filename*=UTF-8''Cover_Letter_Acme_Analyst.pdf";
        assert_eq!(
            disposition_filename(value).as_deref(),
            Some("Cover_Letter_Acme_Analyst.pdf")
        );
    }

    #[test]
    fn test_disposition_filename_missing() {
        assert_eq!(disposition_filename("attachment"), None);
        assert_eq!(disposition_filename("attachment; filename=\"\""), None);
    }

    #[test]
    fn test_fallback_filename() {
        let job = JobTarget {
            company_name: "Acme Corp".into(),
            position: "Data  Analyst".into(),
        };
        assert_eq!(fallback_filename(&job), "Cover_Letter_Acme_Corp_Data_Analyst.pdf");
    }

    #[test]
    fn test_fallback_filename_keeps_edge_whitespace_runs() {
        let job = JobTarget {
            company_name: " Acme".into(),
            position: "Data_ Analyst \t".into(),
        };
        assert_eq!(fallback_filename(&job), "Cover_Letter__Acme_Data__Analyst_.pdf");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8080/");
        assert_eq!(backend.url("/api/generate"), "http://localhost:8080/api/generate");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let backend = HttpBackend::new("http://127.0.0.1:9");
        let file = SelectedFile::new("cv.pdf", "application/pdf", b"%PDF-1.4".to_vec());
        let err = backend.extract(&file).await.unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }
}
