//! Client-side orchestration of the cover-letter form.
//!
//! A [`FormSession`] walks one applicant through upload, generation, editing
//! and download, talking to the API through a [`LetterBackend`].

pub mod backend;
pub mod error;
pub mod session;
pub mod types;

pub use backend::{HttpBackend, LetterBackend};
pub use error::{BackendError, FormError};
pub use session::{CoverLetterDraft, FormSession, Stage};
pub use types::{ApplicantProfile, JobTarget, RenderedArtifact, SelectedFile};
