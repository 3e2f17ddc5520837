//! Application layer for ai-discussion-panel
//!
//! This crate contains the discussion orchestrator, the actors, port
//! definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DiscussionConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    discussion_events::{DiscussionEvent, EventReceiver, EventSender, event_channel},
    llm_gateway::{GatewayError, LlmGateway},
};
pub use use_cases::run_discussion::{
    Actor, AiDiscussion, DiscussionError, DiscussionSession, DiscussionSummary, ModeratorActor,
    Panel, Speaker,
};
