//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for ai-discussion
#[derive(Parser, Debug)]
#[command(name = "ai-discussion")]
#[command(author, version, about = "AI Discussion Panel - five AI actors discuss a topic")]
#[command(long_about = r#"
AI Discussion Panel runs a moderated discussion between five AI actors backed
by a local Ollama model:

  Questioner  asks questions about the topic
  Expert 1    answers them
  Expert 2    refines Expert 1's answers
  Validator   checks relevance and accuracy
  Moderator   steers the discussion and decides when it is complete

Without a topic an interactive session starts: enter a topic, type 'q' and
press Enter to stop the running discussion, type 'quit' to exit.

Configuration files are loaded from (in priority order):
1. AI_PANEL_* environment variables
2. --config <path>        Explicit config file
3. ./ai-panel.toml        Project-level config
4. ~/.config/ai-discussion-panel/config.toml   Global config

Example:
  ai-discussion "Memory safety without garbage collection"
  ai-discussion -m mistral --max-rounds 10 "Trade-offs of microservices"
  ai-discussion
"#)]
pub struct Cli {
    /// Topic to discuss (omit for an interactive session)
    pub topic: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Ollama model used by every actor
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum number of turns per discussion
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Base URL of the Ollama server
    #[arg(long, value_name = "URL")]
    pub ollama_url: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List the models installed on the Ollama server and exit
    #[arg(long)]
    pub list_models: bool,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write the discussion transcript as JSONL to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Tracing filter directive derived from `--debug` and `-v`
    pub fn log_level(&self) -> &'static str {
        match (self.debug, self.verbose) {
            (_, v) if v >= 3 => "trace",
            (true, _) | (_, 2) => "debug",
            (false, 1) => "info",
            _ => "warn",
        }
    }
}
