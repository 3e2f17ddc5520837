//! Application-level configuration.
//!
//! - [`DiscussionConfig`]: turn loop control (round limit, end marker, context window, sampling)

pub mod discussion_config;

pub use discussion_config::DiscussionConfig;
