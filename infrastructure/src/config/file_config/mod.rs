//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod discussion;
mod logging;
mod ollama;
mod output;

pub use discussion::FileDiscussionConfig;
pub use logging::FileLoggingConfig;
pub use ollama::FileOllamaConfig;
pub use output::FileOutputConfig;

use crate::ollama::OllamaConfig;
use panel_application::DiscussionConfig;
use panel_domain::{Model, ModelParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("model_params.temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("model_params.top_p must be greater than 0.0 and at most 1.0, got {0}")]
    InvalidTopP(f32),

    #[error("ollama.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("discussion.max_rounds cannot be 0")]
    InvalidMaxRounds,

    #[error("discussion.end_marker cannot be empty")]
    EmptyEndMarker,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Ollama model tag shared by every actor
    pub model: Model,
    /// Sampling parameters for every generation call
    pub model_params: ModelParams,
    /// Ollama server connection
    pub ollama: FileOllamaConfig,
    /// Turn loop settings
    pub discussion: FileDiscussionConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript and diagnostic log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.as_str().trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        let temperature = self.model_params.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigValidationError::InvalidTemperature(temperature));
        }

        let top_p = self.model_params.top_p;
        if !(top_p > 0.0 && top_p <= 1.0) {
            return Err(ConfigValidationError::InvalidTopP(top_p));
        }

        if self.ollama.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.discussion.max_rounds == 0 {
            return Err(ConfigValidationError::InvalidMaxRounds);
        }

        if self.discussion.end_marker.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndMarker);
        }

        Ok(())
    }

    pub fn discussion_config(&self) -> DiscussionConfig {
        DiscussionConfig::default()
            .with_max_rounds(self.discussion.max_rounds)
            .with_end_marker(self.discussion.end_marker.trim())
            .with_context_window(self.discussion.context_window)
            .with_model_params(self.model_params)
    }

    pub fn ollama_config(&self) -> OllamaConfig {
        self.ollama.to_ollama_config()
    }
}
