//! Discussion lifecycle state

use serde::{Deserialize, Serialize};

/// Lifecycle of a discussion run
///
/// `Idle -> Running -> (Stopping ->) Stopped`. A stopped discussion may be
/// started again, which begins a fresh transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiscussionState {
    #[default]
    Idle,
    Running,
    /// Stop was requested; the in-flight turn is still completing
    Stopping,
    Stopped,
}

impl DiscussionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscussionState::Idle => "idle",
            DiscussionState::Running => "running",
            DiscussionState::Stopping => "stopping",
            DiscussionState::Stopped => "stopped",
        }
    }

    /// Whether a new discussion may begin from this state
    pub fn can_start(&self) -> bool {
        matches!(self, DiscussionState::Idle | DiscussionState::Stopped)
    }

    /// Whether a discussion loop currently owns the context
    pub fn is_active(&self) -> bool {
        matches!(self, DiscussionState::Running | DiscussionState::Stopping)
    }
}

impl std::fmt::Display for DiscussionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
