//! Configuration file loading for ai-discussion-panel
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `AI_PANEL_` (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./ai-panel.toml` or `./.ai-panel.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/ai-discussion-panel/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDiscussionConfig, FileLoggingConfig,
    FileOllamaConfig, FileOutputConfig,
};
pub use loader::ConfigLoader;
