//! Infrastructure layer for ai-discussion-panel
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod ollama;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDiscussionConfig, FileLoggingConfig,
    FileOllamaConfig, FileOutputConfig,
};
pub use logging::JsonlConversationLogger;
pub use ollama::{OllamaConfig, OllamaLlmGateway};
