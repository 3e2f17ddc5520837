//! Presentation layer for ai-discussion-panel
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive discussion session.

pub mod cli;
pub mod config;
pub mod interactive;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use config::OutputConfig;
pub use interactive::DiscussionRepl;
pub use output::console::ConsoleFormatter;
pub use output::presenter::DiscussionPresenter;
pub use progress::reporter::TurnProgress;
