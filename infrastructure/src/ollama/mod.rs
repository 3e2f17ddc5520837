//! Ollama adapter
//!
//! Talks to a locally running Ollama server over its HTTP API:
//! `POST /api/generate` for completions and `GET /api/tags` for the list of
//! installed models.

pub mod gateway;
pub mod protocol;

pub use gateway::{OllamaConfig, OllamaLlmGateway};
