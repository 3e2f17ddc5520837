//! Prompt domain
//!
//! Templates for building the prompt of each discussion turn.

mod template;

pub use template::{PromptTemplate, TurnHints};
