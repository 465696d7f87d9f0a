use thiserror::Error;

/// A failed call to the API.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The server answered with an error body.
    #[error("{message}{}", details_suffix(.details))]
    Api {
        status: u16,
        message: String,
        details: Option<String>,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

fn details_suffix(details: &Option<String>) -> String {
    match details {
        Some(d) if !d.is_empty() => format!(": {d}"),
        _ => String::new(),
    }
}

impl BackendError {
    pub fn api(status: u16, message: impl Into<String>, details: Option<String>) -> Self {
        BackendError::Api {
            status,
            message: message.into(),
            details,
        }
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{0}")]
    Validation(String),

    #[error("Cannot {action} while {from:?}")]
    InvalidTransition {
        from: crate::session::Stage,
        action: &'static str,
    },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Failed to save file: {0}")]
    Io(#[from] std::io::Error),
}
