// Letter Generation Service
// Implements: request validation, prompt construction, model call.
// All model calls go through llm_client::TextModel.

pub mod generator;
pub mod handlers;
pub mod prompts;

pub use generator::LetterGenerator;
