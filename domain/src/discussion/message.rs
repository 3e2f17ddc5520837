//! Transcript message entity

use crate::core::role::ActorRole;
use serde::{Deserialize, Serialize};

/// Text of the placeholder message recorded when a participant's model call fails
pub const ERROR_SENTINEL_TEXT: &str =
    "[error] This participant could not respond (the language model is unavailable).";

/// One contribution to the transcript (Entity)
///
/// Immutable once created: fields are only readable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    speaker: ActorRole,
    text: String,
    turn_index: usize,
    is_error: bool,
}

impl Message {
    pub fn new(speaker: ActorRole, text: impl Into<String>, turn_index: usize) -> Self {
        Self {
            speaker,
            text: text.into(),
            turn_index,
            is_error: false,
        }
    }

    /// Placeholder substituted for a failed turn; keeps the speaker's role
    pub fn error_sentinel(speaker: ActorRole, turn_index: usize) -> Self {
        Self {
            speaker,
            text: ERROR_SENTINEL_TEXT.to_string(),
            turn_index,
            is_error: true,
        }
    }

    pub fn speaker(&self) -> ActorRole {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}
