use crate::config::Config;
use crate::generation::LetterGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Nothing in here is mutated after startup; requests share no other state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Letter Generation Service, wrapping the model client chosen at startup.
    pub generator: LetterGenerator,
}
