//! Port for the structured discussion transcript.
//!
//! Separate from `tracing`: tracing carries human-readable diagnostics, this
//! port records every discussion (start, each turn, end) in a
//! machine-readable form keyed by the session that produced it.

use panel_domain::{ActorRole, EndReason, Message};
use serde::Serialize;

/// One transcript record of a discussion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    DiscussionStarted {
        topic: String,
        max_rounds: usize,
    },
    Turn {
        turn_index: usize,
        role: ActorRole,
        is_error: bool,
        text: String,
    },
    DiscussionEnded {
        reason: EndReason,
        rounds: usize,
    },
}

impl ConversationEvent {
    pub fn turn(message: &Message) -> Self {
        ConversationEvent::Turn {
            turn_index: message.turn_index(),
            role: message.speaker(),
            is_error: message.is_error(),
            text: message.text().to_string(),
        }
    }

    /// Record type as written to the `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            ConversationEvent::DiscussionStarted { .. } => "discussion_started",
            ConversationEvent::Turn { .. } => "turn",
            ConversationEvent::DiscussionEnded { .. } => "discussion_ended",
        }
    }
}

/// Sink for discussion transcripts.
///
/// `log` is synchronous and infallible: a failing sink must never interrupt
/// a discussion.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, session_id: &str, event: &ConversationEvent);
}

/// Disabled transcript.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _session_id: &str, _event: &ConversationEvent) {}
}
