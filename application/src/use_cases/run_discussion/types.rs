//! Type definitions for the RunDiscussion use case.

use chrono::{DateTime, Utc};
use panel_domain::{ConversationContext, EndReason, Message, Topic};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors returned to the caller of `start`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscussionError {
    #[error("A discussion is already running")]
    AlreadyRunning,

    #[error("Invalid topic: {0}")]
    InvalidTopic(String),
}

/// Runtime link between a running discussion and its stop flag
#[derive(Debug, Clone)]
pub struct DiscussionSession {
    id: String,
    started_at: DateTime<Utc>,
    cancellation: CancellationToken,
}

impl DiscussionSession {
    pub fn new() -> Self {
        let started_at = Utc::now();
        Self {
            id: started_at.format("%Y%m%d-%H%M%S%.3f").to_string(),
            started_at,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Ask the turn loop to stop at its next turn boundary
    pub fn request_stop(&self) {
        self.cancellation.cancel();
    }

    pub fn is_stop_requested(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

impl Default for DiscussionSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a finished discussion
#[derive(Debug, Clone)]
pub struct DiscussionSummary {
    pub session_id: String,
    pub context: ConversationContext,
    pub reason: EndReason,
}

impl DiscussionSummary {
    pub fn topic(&self) -> &Topic {
        self.context.topic()
    }

    pub fn transcript(&self) -> &[Message] {
        self.context.transcript()
    }

    pub fn rounds(&self) -> usize {
        self.context.round_count()
    }

    /// Number of turns that ended in an error sentinel
    pub fn failed_turns(&self) -> usize {
        self.transcript().iter().filter(|m| m.is_error()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_domain::ActorRole;

    #[test]
    fn test_session_stop_flag() {
        let session = DiscussionSession::new();
        assert!(!session.is_stop_requested());

        let handle = session.clone();
        handle.request_stop();
        assert!(session.is_stop_requested());
        assert!(!session.id().is_empty());
    }

    #[test]
    fn test_summary_counts_failed_turns() {
        let mut context = ConversationContext::new(Topic::new("t").unwrap());
        context.append(Message::new(ActorRole::Questioner, "q", 0));
        context.append(Message::error_sentinel(ActorRole::Expert1, 1));

        let summary = DiscussionSummary {
            session_id: "s".to_string(),
            context,
            reason: EndReason::StopRequested,
        };
        assert_eq!(summary.rounds(), 2);
        assert_eq!(summary.failed_turns(), 1);
        assert_eq!(summary.topic().content(), "t");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            DiscussionError::AlreadyRunning.to_string(),
            "A discussion is already running"
        );
    }
}
