//! Configuration for recap (stored in ~/.config/recap/config.toml)
//!
//! Secrets and endpoints can always be supplied through the environment;
//! the config file carries the durable, non-secret defaults. Environment
//! values win over file values.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{RecapError, Result};
use crate::inference::{HttpQuestionBackend, HttpSummaryBackend};
use crate::notion::NotionClient;
use crate::summary::DEFAULT_MAX_WORDS;
use crate::text::DEFAULT_CHUNK_SIZE;

const CONFIG_DIR: &str = "recap";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "RECAP_CONFIG_DIR";

/// Notion workspace credentials and ids
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotionConfig {
    /// Integration token; usually supplied via NOTION_API_KEY instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Parent page under which `recap setup` creates the tasks database
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_page_id: Option<String>,

    /// Tasks database id, printed by `recap setup`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks_database_id: Option<String>,
}

/// Inference endpoint configuration.
///
/// Applied once at startup; all requests are synchronous and
/// single-threaded, so there is no per-call tuning beyond these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Summarization model endpoint (empty means unconfigured)
    #[serde(default)]
    pub summary_endpoint: String,

    /// Question-generation model endpoint (empty means unconfigured)
    #[serde(default)]
    pub question_endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_inference_timeout")]
    pub timeout_seconds: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            summary_endpoint: String::new(),
            question_endpoint: String::new(),
            timeout_seconds: default_inference_timeout(),
        }
    }
}

/// Summary generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Chunk size budget in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Word budget for generated summaries
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        SummaryConfig {
            chunk_size: default_chunk_size(),
            max_words: default_max_words(),
        }
    }
}

/// Full recap configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub notion: NotionConfig,

    #[serde(default)]
    pub inference: InferenceConfig,

    #[serde(default)]
    pub summary: SummaryConfig,
}

impl Config {
    fn config_path() -> Result<PathBuf> {
        // Allow environment variable override for testing
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    RecapError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load the config file (defaults when absent), then apply environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env();
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| RecapError::InvalidConfig {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| RecapError::InvalidConfig {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Write the config back to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let config_dir = path
            .parent()
            .ok_or_else(|| RecapError::Other("invalid config path".to_string()))?;

        fs::create_dir_all(config_dir)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| RecapError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(&path, content)?;

        Ok(())
    }

    fn apply_env(&mut self) {
        if let Some(value) = env_non_empty("NOTION_API_KEY") {
            self.notion.api_key = Some(value);
        }
        if let Some(value) = env_non_empty("NOTION_PAGE_ID") {
            self.notion.parent_page_id = Some(value);
        }
        if let Some(value) = env_non_empty("TASKS_DATABASE_ID") {
            self.notion.tasks_database_id = Some(value);
        }
        if let Some(value) = env_non_empty("RECAP_SUMMARY_ENDPOINT") {
            self.inference.summary_endpoint = value;
        }
        if let Some(value) = env_non_empty("RECAP_QUESTION_ENDPOINT") {
            self.inference.question_endpoint = value;
        }
        if let Some(value) = env_non_empty("RECAP_INFERENCE_TIMEOUT") {
            if let Ok(seconds) = value.parse::<u64>() {
                self.inference.timeout_seconds = seconds.clamp(5, 600);
            }
        }
    }

    /// Build a Notion client, or fail with a configuration error
    pub fn notion_client(&self) -> Result<NotionClient> {
        let api_key = self
            .notion
            .api_key
            .as_deref()
            .ok_or_else(|| RecapError::not_configured("Notion API key", "NOTION_API_KEY"))?;
        Ok(NotionClient::new(api_key))
    }

    /// Tasks database id, or a configuration error pointing at `recap setup`
    pub fn tasks_database_id(&self) -> Result<&str> {
        self.notion.tasks_database_id.as_deref().ok_or_else(|| {
            RecapError::not_configured(
                "tasks database id",
                "TASKS_DATABASE_ID or run `recap setup`",
            )
        })
    }

    /// Parent page id for `recap setup`
    pub fn parent_page_id(&self) -> Result<&str> {
        self.notion
            .parent_page_id
            .as_deref()
            .ok_or_else(|| RecapError::not_configured("Notion parent page id", "NOTION_PAGE_ID"))
    }

    /// Summarization backend from the configured endpoint.
    ///
    /// An unconfigured endpoint still yields a backend; calls through it
    /// fail and the summary engine absorbs that as a fail-soft result.
    pub fn summary_backend(&self) -> HttpSummaryBackend {
        HttpSummaryBackend::new(
            self.inference.summary_endpoint.clone(),
            self.inference.timeout_seconds,
        )
    }

    /// Question-generation backend from the configured endpoint
    pub fn question_backend(&self) -> HttpQuestionBackend {
        HttpQuestionBackend::new(
            self.inference.question_endpoint.clone(),
            self.inference.timeout_seconds,
        )
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn default_inference_timeout() -> u64 {
    crate::inference::DEFAULT_INFERENCE_TIMEOUT_SECONDS
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.notion.api_key.is_none());
        assert!(config.inference.summary_endpoint.is_empty());
        assert_eq!(config.summary.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.summary.max_words, DEFAULT_MAX_WORDS);
    }

    #[test]
    fn test_missing_credentials_are_config_errors() {
        let config = Config::default();
        assert!(config.notion_client().is_err());
        assert!(config.tasks_database_id().is_err());
        assert!(config.parent_page_id().is_err());
    }

    #[test]
    fn test_parse_partial_config_file() {
        let parsed: Config = toml::from_str(
            r#"
            [summary]
            chunk_size = 256

            [notion]
            tasks_database_id = "db-123"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.summary.chunk_size, 256);
        assert_eq!(parsed.summary.max_words, DEFAULT_MAX_WORDS);
        assert_eq!(parsed.notion.tasks_database_id.as_deref(), Some("db-123"));
        assert!(parsed.inference.summary_endpoint.is_empty());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempdir().unwrap();
        std::env::set_var(CONFIG_DIR_ENV_VAR, dir.path());

        let mut config = Config::default();
        config.summary.max_words = 150;
        config.inference.summary_endpoint = "http://localhost:8080/summarize".to_string();
        config.save().unwrap();

        let reloaded = Config::load_file().unwrap();
        assert_eq!(reloaded.summary.max_words, 150);
        assert_eq!(
            reloaded.inference.summary_endpoint,
            "http://localhost:8080/summarize"
        );

        std::env::remove_var(CONFIG_DIR_ENV_VAR);
    }
}
