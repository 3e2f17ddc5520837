//! Discussion domain
//!
//! The transcript model and the rules that drive a panel discussion:
//!
//! - [`message::Message`]: one immutable transcript entry
//! - [`context::ConversationContext`]: topic, transcript and round counter
//! - [`policy::TurnPolicy`]: next-speaker selection and stop conditions
//! - [`state::DiscussionState`]: lifecycle of a run

pub mod context;
pub mod message;
pub mod policy;
pub mod profile;
pub mod state;
