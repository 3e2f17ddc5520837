//! Ollama connection configuration from TOML (`[ollama]` section)

use crate::ollama::OllamaConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw Ollama configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    /// Server root URL
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            base_url: OllamaConfig::DEFAULT_BASE_URL.to_string(),
            timeout_seconds: OllamaConfig::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl FileOllamaConfig {
    pub fn to_ollama_config(&self) -> OllamaConfig {
        OllamaConfig::default()
            .with_base_url(self.base_url.trim())
            .with_timeout(Duration::from_secs(self.timeout_seconds))
    }
}
