//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::DEFAULT_MODEL;
use crate::application::handlers::generation::GenerationSettings;
use crate::domain::generation::COMPRESSION_THRESHOLD;

/// Text-generation settings (Anthropic Messages API).
///
/// The API key is optional so the service can start without it; generation
/// requests then fail with a configuration error.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    pub anthropic_api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Override for the API origin (tests, proxies)
    pub base_url: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Token budget for the generation call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Token budget for the compression call
    #[serde(default = "default_compression_max_tokens")]
    pub compression_max_tokens: u32,

    /// Prompts longer than this many characters are compressed first
    #[serde(default = "default_compression_threshold")]
    pub compression_threshold: usize,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.anthropic_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Token budgets and compression threshold for the generation handler.
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            compression_threshold: self.compression_threshold,
            max_tokens: self.max_tokens,
            compression_max_tokens: self.compression_max_tokens,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = self.api_key() {
            if !key.starts_with("sk-ant-") {
                return Err(ValidationError::InvalidAnthropicKey);
            }
        }
        if self.max_tokens == 0 || self.compression_max_tokens == 0 {
            return Err(ValidationError::InvalidTokenBudget);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            model: default_model(),
            base_url: None,
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            compression_max_tokens: default_compression_max_tokens(),
            compression_threshold: default_compression_threshold(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_tokens() -> u32 {
    8192
}

fn default_compression_max_tokens() -> u32 {
    1024
}

fn default_compression_threshold() -> usize {
    COMPRESSION_THRESHOLD
}
