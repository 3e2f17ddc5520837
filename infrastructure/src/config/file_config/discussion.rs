//! Discussion configuration from TOML (`[discussion]` section)
//!
//! ```toml
//! [discussion]
//! max_rounds = 20
//! end_marker = "[END OF DISCUSSION]"
//! context_window = 5      # 0 = whole transcript
//! ```

use panel_domain::TurnPolicy;
use serde::{Deserialize, Serialize};

/// Raw discussion configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    pub max_rounds: usize,
    pub end_marker: String,
    /// Number of recent messages shown to each actor
    pub context_window: usize,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        Self {
            max_rounds: TurnPolicy::DEFAULT_MAX_ROUNDS,
            end_marker: TurnPolicy::DEFAULT_END_MARKER.to_string(),
            context_window: 5,
        }
    }
}
