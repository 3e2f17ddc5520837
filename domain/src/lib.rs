//! Domain layer for ai-discussion-panel
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Panel
//!
//! Five scripted actors take turns on a topic: the Questioner asks, Expert 1
//! answers, Expert 2 augments, the Validator checks, and the Moderator either
//! poses a new sub-question or closes the discussion.
//!
//! ## Turn Policy
//!
//! [`TurnPolicy`] decides who speaks next and when a discussion is over
//! (round limit, end marker, or external stop).

pub mod core;
pub mod discussion;
pub mod prompt;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    model::{Model, ModelParams},
    role::ActorRole,
    string::{single_line, truncate},
    topic::Topic,
};
pub use discussion::{
    context::ConversationContext,
    message::{ERROR_SENTINEL_TEXT, Message},
    policy::{EndReason, TurnPolicy, TurnState},
    profile::ActorProfile,
    state::DiscussionState,
};
pub use prompt::{PromptTemplate, TurnHints};
