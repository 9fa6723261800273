//! HTTP inference backends
//!
//! Speaks the text-generation-inference style JSON protocol: a POST of
//! `{"inputs": ..., "parameters": {...}}` answered by either an object or
//! a one-element array carrying `summary_text`/`generated_text`.

use std::time::Duration;

use serde_json::Value;

use super::{InferenceError, QuestionBackend, SummaryBackend};

/// Default timeout for inference requests (model inference may take seconds)
pub const DEFAULT_INFERENCE_TIMEOUT_SECONDS: u64 = 120;

/// HTTP client for a summarization model endpoint
pub struct HttpSummaryBackend {
    endpoint: String,
    timeout: Duration,
    user_agent: String,
}

impl HttpSummaryBackend {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(timeout_seconds),
            user_agent: user_agent(),
        }
    }
}

impl SummaryBackend for HttpSummaryBackend {
    fn summarize(
        &self,
        text: &str,
        max_new_tokens: usize,
        min_length: usize,
    ) -> Result<String, InferenceError> {
        let body = serde_json::json!({
            "inputs": text,
            "parameters": {
                "max_new_tokens": max_new_tokens,
                "min_length": min_length,
                "do_sample": false,
            },
        });
        post_inference(&self.endpoint, self.timeout, &self.user_agent, body)
    }
}

/// HTTP client for a text2text generation model endpoint
pub struct HttpQuestionBackend {
    endpoint: String,
    timeout: Duration,
    user_agent: String,
}

impl HttpQuestionBackend {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(timeout_seconds),
            user_agent: user_agent(),
        }
    }
}

impl QuestionBackend for HttpQuestionBackend {
    fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String, InferenceError> {
        let body = serde_json::json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": max_new_tokens,
                "num_return_sequences": 1,
            },
        });
        post_inference(&self.endpoint, self.timeout, &self.user_agent, body)
    }
}

fn user_agent() -> String {
    format!(
        "recap/{} ({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}

fn post_inference(
    endpoint: &str,
    timeout: Duration,
    user_agent: &str,
    body: Value,
) -> Result<String, InferenceError> {
    if endpoint.is_empty() {
        return Err(InferenceError::NotConfigured);
    }

    let response = ureq::post(endpoint)
        .set("Content-Type", "application/json")
        .set("User-Agent", user_agent)
        .timeout(timeout)
        .send_json(body);

    match response {
        Ok(res) => {
            let value: Value = res
                .into_json()
                .map_err(|e| InferenceError::MalformedResponse(e.to_string()))?;
            extract_generated_text(&value).ok_or_else(|| {
                InferenceError::MalformedResponse(
                    "no summary_text or generated_text field in response".to_string(),
                )
            })
        }
        Err(ureq::Error::Status(code, res)) => {
            let message = res.into_string().unwrap_or_default();
            Err(InferenceError::Status {
                status: code,
                message,
            })
        }
        Err(ureq::Error::Transport(e)) => Err(InferenceError::Transport(e.to_string())),
    }
}

/// Pull the generated text out of a pipeline-style response.
///
/// Accepts `[{"summary_text": ...}]`, `[{"generated_text": ...}]`, or the
/// same keys on a bare object.
fn extract_generated_text(value: &Value) -> Option<String> {
    let object = match value {
        Value::Array(items) => items.first()?,
        other => other,
    };

    for key in ["summary_text", "generated_text"] {
        if let Some(text) = object.get(key).and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }

    None
}
