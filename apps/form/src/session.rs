//! The cover-letter form as an explicit state machine.
//!
//! ```text
//! Idle ─select_file─► Uploading ─ok─► Extracted ─generate─► Generating ─ok─► Drafted
//!   ▲                     │              ▲   ▲                  │              │ ▲
//!   └────────err──────────┘              │   └───────err────────┘   begin_edit │ │ save/cancel
//!                                        │                                     ▼ │
//!                   select_file from Extracted or Drafted                    Editing
//!
//! Drafted ─download─► Rendering ─► Drafted
//! ```
//!
//! Every method takes `&mut self`, so at most one request is in flight.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::backend::LetterBackend;
use crate::error::FormError;
use crate::types::{ApplicantProfile, JobTarget, RenderedArtifact, SelectedFile};

pub const NOT_A_PDF: &str = "Please upload a PDF file";
pub const MISSING_FIELDS: &str = "Please upload your resume and fill in all required fields";

/// Shown next to any error that mentions the API key.
pub const API_KEY_SETUP_HINT: &str =
    "Create a .env file next to the API server containing GEMINI_API_KEY=<your key>, then restart the server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Uploading,
    Extracted,
    Generating,
    Drafted,
    Editing,
    Rendering,
}

impl Stage {
    pub fn is_busy(self) -> bool {
        matches!(self, Stage::Uploading | Stage::Generating | Stage::Rendering)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverLetterDraft {
    pub generated_text: String,
    pub edited_text: String,
    pub is_editing: bool,
    saved_text: String,
}

impl CoverLetterDraft {
    fn new(generated_text: String) -> Self {
        Self {
            edited_text: generated_text.clone(),
            saved_text: generated_text.clone(),
            generated_text,
            is_editing: false,
        }
    }
}

pub struct FormSession<B> {
    backend: B,
    stage: Stage,
    profile: ApplicantProfile,
    job: JobTarget,
    file_name: Option<String>,
    resume_text: String,
    draft: Option<CoverLetterDraft>,
    error: Option<String>,
}

impl<B: LetterBackend> FormSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            stage: Stage::Idle,
            profile: ApplicantProfile::default(),
            job: JobTarget::default(),
            file_name: None,
            resume_text: String::new(),
            draft: None,
            error: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn profile(&self) -> &ApplicantProfile {
        &self.profile
    }

    pub fn job(&self) -> &JobTarget {
        &self.job
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn draft(&self) -> Option<&CoverLetterDraft> {
        self.draft.as_ref()
    }

    /// The message to show the user for the last failed action.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Setup instructions when the last error is about the API key.
    pub fn setup_hint(&self) -> Option<&'static str> {
        self.error
            .as_deref()
            .filter(|e| e.contains("API key"))
            .map(|_| API_KEY_SETUP_HINT)
    }

    pub fn is_extracting(&self) -> bool {
        self.stage == Stage::Uploading
    }

    pub fn is_generating(&self) -> bool {
        self.stage == Stage::Generating
    }

    pub fn is_rendering(&self) -> bool {
        self.stage == Stage::Rendering
    }

    // ── Input ───────────────────────────────────────────────────────────────

    /// Uploads `file` and stores its text. Replaces any earlier resume and
    /// discards a draft written from it.
    pub async fn select_file(&mut self, file: SelectedFile) -> Result<(), FormError> {
        self.require(&[Stage::Idle, Stage::Extracted, Stage::Drafted], "select a file")?;

        if !file.is_pdf() {
            return Err(self.fail(FormError::Validation(NOT_A_PDF.to_string())));
        }

        self.stage = Stage::Uploading;
        self.draft = None;
        self.error = None;

        let result = self.backend.extract(&file).await;
        match result {
            Ok(text) => {
                info!("Extracted {} characters from {}", text.len(), file.name);
                self.file_name = Some(file.name);
                self.resume_text = text;
                self.stage = Stage::Extracted;
                Ok(())
            }
            Err(e) => {
                warn!("Extraction failed for {}: {e}", file.name);
                self.file_name = None;
                self.resume_text.clear();
                self.stage = Stage::Idle;
                Err(self.fail(e.into()))
            }
        }
    }

    pub fn set_profile(&mut self, profile: ApplicantProfile) -> Result<(), FormError> {
        self.require_idle_input("edit the profile")?;
        self.profile = profile;
        Ok(())
    }

    pub fn set_job_target(&mut self, job: JobTarget) -> Result<(), FormError> {
        self.require_idle_input("edit the job details")?;
        self.job = job;
        Ok(())
    }

    // ── Generation ──────────────────────────────────────────────────────────

    /// Drafts a letter from the stored resume text and job details.
    pub async fn generate(&mut self) -> Result<&CoverLetterDraft, FormError> {
        self.require(&[Stage::Idle, Stage::Extracted, Stage::Drafted], "generate")?;

        if self.resume_text.is_empty()
            || self.job.company_name.is_empty()
            || self.job.position.is_empty()
        {
            return Err(self.fail(FormError::Validation(MISSING_FIELDS.to_string())));
        }

        self.stage = Stage::Generating;
        self.error = None;

        let result = self
            .backend
            .generate(&self.profile, &self.resume_text, &self.job)
            .await;
        match result {
            Ok(text) => {
                info!(
                    "Drafted letter for {} at {}",
                    self.job.position, self.job.company_name
                );
                self.stage = Stage::Drafted;
                Ok(&*self.draft.insert(CoverLetterDraft::new(text)))
            }
            Err(e) => {
                warn!("Generation failed: {e}");
                self.draft = None;
                self.stage = Stage::Extracted;
                Err(self.fail(e.into()))
            }
        }
    }

    // ── Editing ─────────────────────────────────────────────────────────────

    pub fn begin_edit(&mut self) -> Result<(), FormError> {
        self.require(&[Stage::Drafted], "edit")?;
        self.draft_mut()?.is_editing = true;
        self.stage = Stage::Editing;
        self.error = None;
        Ok(())
    }

    pub fn update_draft(&mut self, text: impl Into<String>) -> Result<(), FormError> {
        self.require(&[Stage::Editing], "change the draft")?;
        self.draft_mut()?.edited_text = text.into();
        Ok(())
    }

    /// Keeps the edited text; it is what gets rendered.
    pub fn save_edit(&mut self) -> Result<(), FormError> {
        self.require(&[Stage::Editing], "save")?;
        let draft = self.draft_mut()?;
        draft.saved_text = draft.edited_text.clone();
        draft.is_editing = false;
        self.stage = Stage::Drafted;
        Ok(())
    }

    /// Drops unsaved changes.
    pub fn cancel_edit(&mut self) -> Result<(), FormError> {
        self.require(&[Stage::Editing], "cancel")?;
        let draft = self.draft_mut()?;
        draft.edited_text = draft.saved_text.clone();
        draft.is_editing = false;
        self.stage = Stage::Drafted;
        Ok(())
    }

    // ── Output ──────────────────────────────────────────────────────────────

    /// Renders the current edited text.
    pub async fn download(&mut self) -> Result<RenderedArtifact, FormError> {
        self.require(&[Stage::Drafted], "download")?;
        let text = self.draft_mut()?.edited_text.clone();

        self.stage = Stage::Rendering;
        self.error = None;

        let result = self.backend.render(&text, &self.profile, &self.job).await;
        self.stage = Stage::Drafted;

        match result {
            Ok(artifact) => {
                info!("Rendered {} ({} bytes)", artifact.filename, artifact.bytes.len());
                Ok(artifact)
            }
            Err(e) => {
                warn!("Render failed: {e}");
                Err(self.fail(e.into()))
            }
        }
    }

    /// Writes `artifact` into `dir` under its own file name.
    pub async fn save_artifact(
        &mut self,
        artifact: &RenderedArtifact,
        dir: impl AsRef<Path>,
    ) -> Result<PathBuf, FormError> {
        let Some(name) = Path::new(&artifact.filename).file_name() else {
            return Err(self.fail(FormError::Validation(format!(
                "Invalid file name: {}",
                artifact.filename
            ))));
        };
        let path = dir.as_ref().join(name);

        if let Err(e) = tokio::fs::write(&path, &artifact.bytes).await {
            return Err(self.fail(e.into()));
        }
        info!("Saved {}", path.display());
        self.error = None;
        Ok(path)
    }

    // ── Helpers ─────────────────────────────────────────────────────────────

    fn require(&mut self, allowed: &[Stage], action: &'static str) -> Result<(), FormError> {
        if allowed.contains(&self.stage) {
            return Ok(());
        }
        Err(self.fail(FormError::InvalidTransition {
            from: self.stage,
            action,
        }))
    }

    fn require_idle_input(&mut self, action: &'static str) -> Result<(), FormError> {
        if self.stage.is_busy() {
            return Err(self.fail(FormError::InvalidTransition {
                from: self.stage,
                action,
            }));
        }
        Ok(())
    }

    fn draft_mut(&mut self) -> Result<&mut CoverLetterDraft, FormError> {
        let stage = self.stage;
        self.draft.as_mut().ok_or(FormError::InvalidTransition {
            from: stage,
            action: "use a draft that does not exist",
        })
    }

    fn fail(&mut self, err: FormError) -> FormError {
        self.error = Some(err.to_string());
        err
    }
}
