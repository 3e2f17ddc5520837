//! Interactive terminal session

mod repl;

pub use repl::DiscussionRepl;
