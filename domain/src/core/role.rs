//! Actor roles taking part in a discussion

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The five scripted participants of a discussion (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Asks questions about the topic
    Questioner,
    /// Answers the latest question
    Expert1,
    /// Augments or optimizes Expert 1's answer
    Expert2,
    /// Checks questions and answers for relevance and accuracy
    Validator,
    /// Steers the discussion and decides when it is over
    Moderator,
}

impl ActorRole {
    /// All roles in speaking order within one cycle
    pub const ALL: [ActorRole; 5] = [
        ActorRole::Questioner,
        ActorRole::Expert1,
        ActorRole::Expert2,
        ActorRole::Validator,
        ActorRole::Moderator,
    ];

    /// Stable identifier, used in logs and config
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Questioner => "questioner",
            ActorRole::Expert1 => "expert1",
            ActorRole::Expert2 => "expert2",
            ActorRole::Validator => "validator",
            ActorRole::Moderator => "moderator",
        }
    }

    /// Human-readable name shown in the transcript
    pub fn display_name(&self) -> &'static str {
        match self {
            ActorRole::Questioner => "Questioner",
            ActorRole::Expert1 => "Expert 1",
            ActorRole::Expert2 => "Expert 2",
            ActorRole::Validator => "Validator",
            ActorRole::Moderator => "Moderator",
        }
    }

    /// Default role description used in the actor's instructions
    pub fn default_description(&self) -> &'static str {
        match self {
            ActorRole::Questioner => {
                "curious individual who asks insightful questions about the topic required for understanding details"
            }
            ActorRole::Expert1 => {
                "knowledgeable expert who provides detailed insights, answers questions and validates other experts' answers"
            }
            ActorRole::Expert2 => {
                "knowledgeable expert who enhances or optimizes Expert 1's answers and validates other experts' answers"
            }
            ActorRole::Validator => "critical thinker who validates questions and answers",
            ActorRole::Moderator => "discussion leader who manages the conversation flow",
        }
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ActorRole {
    type Err = DomainError;

    /// Accepts either the identifier (`expert1`) or the display name (`Expert 1`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        ActorRole::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| DomainError::InvalidRole(s.to_string()))
    }
}
