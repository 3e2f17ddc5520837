//! Actor identity used in prompts

use crate::core::role::ActorRole;
use serde::{Deserialize, Serialize};

/// Who an actor is: its role, display name and persona description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorProfile {
    pub role: ActorRole,
    pub name: String,
    pub description: String,
}

impl ActorProfile {
    /// Default profile for a role
    pub fn for_role(role: ActorRole) -> Self {
        Self {
            role,
            name: role.display_name().to_string(),
            description: role.default_description().to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Default profiles for the full panel, in speaking order
    pub fn panel() -> Vec<ActorProfile> {
        ActorRole::ALL.into_iter().map(Self::for_role).collect()
    }
}
