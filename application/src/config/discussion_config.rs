//! Discussion parameters for the turn loop.
//!
//! [`DiscussionConfig`] groups the static parameters that drive
//! [`AiDiscussion`](crate::use_cases::run_discussion::AiDiscussion): the
//! round limit and end marker used by the moderator, the transcript window
//! shown to each actor, and the sampling parameters of every model call.

use panel_domain::{ModelParams, TurnPolicy};
use serde::{Deserialize, Serialize};

/// Turn loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionConfig {
    /// Maximum number of turns before the discussion ends.
    pub max_rounds: usize,
    /// Text the moderator emits to close the discussion.
    pub end_marker: String,
    /// Number of recent messages shown to an actor (`0` = whole transcript).
    pub context_window: usize,
    /// Sampling parameters for every generation call.
    pub model_params: ModelParams,
}

impl Default for DiscussionConfig {
    fn default() -> Self {
        Self {
            max_rounds: TurnPolicy::DEFAULT_MAX_ROUNDS,
            end_marker: TurnPolicy::DEFAULT_END_MARKER.to_string(),
            context_window: 5,
            model_params: ModelParams::default(),
        }
    }
}

impl DiscussionConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_marker = marker.into();
        self
    }

    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window;
        self
    }

    pub fn with_model_params(mut self, params: ModelParams) -> Self {
        self.model_params = params;
        self
    }

    /// Moderator policy derived from this configuration
    pub fn turn_policy(&self) -> TurnPolicy {
        TurnPolicy::new(self.max_rounds, self.end_marker.clone())
    }
}
