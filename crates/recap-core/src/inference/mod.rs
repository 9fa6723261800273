//! External inference capabilities
//!
//! The summarization and question-generation models are opaque
//! collaborators reached over HTTP. The traits here are the seams the
//! domain logic depends on; tests substitute scripted implementations.

mod http;

pub use http::{HttpQuestionBackend, HttpSummaryBackend, DEFAULT_INFERENCE_TIMEOUT_SECONDS};

use thiserror::Error;

/// Errors from an inference backend call
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("inference endpoint is not configured")]
    NotConfigured,

    #[error("inference endpoint returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network error reaching inference endpoint: {0}")]
    Transport(String),

    #[error("malformed response from inference endpoint: {0}")]
    MalformedResponse(String),
}

/// A summarization capability.
///
/// Requests are single-shot with sampling disabled, so output is
/// deterministic for fixed inputs.
pub trait SummaryBackend {
    /// Summarize `text`, targeting at most `max_new_tokens` and at least
    /// `min_length` output tokens.
    fn summarize(
        &self,
        text: &str,
        max_new_tokens: usize,
        min_length: usize,
    ) -> Result<String, InferenceError>;
}

/// A free-form text generation capability used for question generation.
pub trait QuestionBackend {
    /// Generate text from `prompt`, capped at `max_new_tokens`.
    fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String, InferenceError>;
}

impl<T: SummaryBackend + ?Sized> SummaryBackend for &T {
    fn summarize(
        &self,
        text: &str,
        max_new_tokens: usize,
        min_length: usize,
    ) -> Result<String, InferenceError> {
        (**self).summarize(text, max_new_tokens, min_length)
    }
}

impl<T: QuestionBackend + ?Sized> QuestionBackend for &T {
    fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String, InferenceError> {
        (**self).generate(prompt, max_new_tokens)
    }
}
