//! LLM Gateway port
//!
//! Defines the interface for talking to the external language model service.

use async_trait::async_trait;
use panel_domain::{Model, ModelParams};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a generation call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The service could not be reached or does not have the model
    #[error("Model not available: {0}")]
    ModelUnavailable(String),

    /// The bounded wait for a response was exceeded
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl GatewayError {
    /// Whether the failure is a connectivity problem rather than a bad response
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            GatewayError::ModelUnavailable(_) | GatewayError::Timeout(_)
        )
    }
}

/// Gateway to the language model
///
/// One call per turn; implementations must not retry internally.
/// Adapters live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Model this gateway generates with
    fn model(&self) -> &Model;

    /// Generate a completion for `prompt`
    async fn generate(&self, prompt: &str, params: &ModelParams) -> Result<String, GatewayError>;

    /// Models installed on the service
    async fn available_models(&self) -> Result<Vec<Model>, GatewayError>;
}
