//! Error types and exit codes for recap
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Configuration error (missing credentials, unreadable config)

use thiserror::Error;

use crate::inference::InferenceError;
use crate::notion::NotionError;

/// Exit codes for the recap CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Configuration error - missing credentials, bad config file (3)
    Config = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during recap operations
#[derive(Error, Debug)]
pub enum RecapError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("the --format flag may only be given once")]
    DuplicateFormat,

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Configuration errors (exit code 3)
    #[error("{what} is not configured (set {hint})")]
    NotConfigured { what: String, hint: String },

    #[error("invalid config file {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Notion(#[from] NotionError),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl RecapError {
    /// Create an error for an invalid value or argument
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        RecapError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a missing configuration value
    pub fn not_configured(what: &str, hint: &str) -> Self {
        RecapError::NotConfigured {
            what: what.to_string(),
            hint: hint.to_string(),
        }
    }

    /// Create an error for a failed operation
    pub fn failed(operation: &str, reason: impl std::fmt::Display) -> Self {
        RecapError::FailedOperation {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RecapError::UnknownFormat(_)
            | RecapError::DuplicateFormat
            | RecapError::UsageError(_)
            | RecapError::InvalidValue { .. } => ExitCode::Usage,

            RecapError::NotConfigured { .. } | RecapError::InvalidConfig { .. } => {
                ExitCode::Config
            }

            RecapError::Io(_)
            | RecapError::Json(_)
            | RecapError::Toml(_)
            | RecapError::Inference(_)
            | RecapError::Notion(_)
            | RecapError::FailedOperation { .. }
            | RecapError::Other(_) => ExitCode::Failure,
        }
    }

    /// Stable error type identifier for machine-readable output
    pub fn error_type(&self) -> &'static str {
        match self {
            RecapError::UnknownFormat(_) => "unknown_format",
            RecapError::DuplicateFormat => "duplicate_format",
            RecapError::UsageError(_) => "usage_error",
            RecapError::InvalidValue { .. } => "invalid_value",
            RecapError::NotConfigured { .. } => "not_configured",
            RecapError::InvalidConfig { .. } => "invalid_config",
            RecapError::Io(_) => "io_error",
            RecapError::Json(_) => "json_error",
            RecapError::Toml(_) => "toml_error",
            RecapError::Inference(_) => "inference_error",
            RecapError::Notion(_) => "notion_error",
            RecapError::FailedOperation { .. } => "failed_operation",
            RecapError::Other(_) => "error",
        }
    }

    /// Render this error as a structured JSON envelope for `--format json`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        })
    }
}

pub type Result<T> = std::result::Result<T, RecapError>;
