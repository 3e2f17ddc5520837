//! CLI entrypoint for AI Discussion Panel
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use panel_application::{AiDiscussion, ConversationLogger, LlmGateway, NoConversationLogger};
use panel_domain::Model;
use panel_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger, OllamaLlmGateway};
use panel_presentation::{Cli, ConsoleFormatter, DiscussionRepl, OutputConfig};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(&cli, &config)?;
    info!("Starting AI Discussion Panel (model={})", config.model);

    let output = OutputConfig {
        color: config.output.color && !cli.no_color,
        show_progress: config.output.show_progress && !cli.quiet,
    };
    output.apply_color();

    // === Dependency Injection ===
    // Create infrastructure adapter (Ollama Gateway)
    let gateway = Arc::new(OllamaLlmGateway::new(
        config.model.clone(),
        config.ollama_config(),
    )?);

    if cli.list_models {
        let models = gateway
            .available_models()
            .await
            .context("Could not list Ollama models")?;
        print!("{}", ConsoleFormatter::models(&models, gateway.model()));
        return Ok(());
    }

    let logger = conversation_logger(&cli, &config);
    let discussion = Arc::new(
        AiDiscussion::new(gateway, config.discussion_config()).with_logger(logger),
    );
    let repl = DiscussionRepl::new(discussion, output);

    match cli.topic.as_deref() {
        Some(topic) => {
            repl.run_once(topic).await?;
        }
        None => repl.run().await?,
    }

    Ok(())
}

/// Command-line flags take precedence over every configuration source
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.model = Model::new(model.trim());
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.discussion.max_rounds = max_rounds;
    }
    if let Some(url) = &cli.ollama_url {
        config.ollama.base_url = url.clone();
    }
}

/// Install the tracing subscriber.
///
/// Diagnostics go to stderr so they never interleave with the transcript on
/// stdout. The returned guard must live until exit to flush the log file.
fn init_logging(cli: &Cli, config: &FileConfig) -> Result<Option<WorkerGuard>> {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(cli.log_level()));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let Some(log_file) = &config.logging.log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    let (dir, file_name) = split_log_path(log_file)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(Some(guard))
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("logging.log_file must name a file: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir, file_name))
}

/// `--transcript` wins over `logging.transcript_dir`; failures fall back to no transcript
fn conversation_logger(cli: &Cli, config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let logger = match (&cli.transcript, &config.logging.transcript_dir) {
        (Some(path), _) => JsonlConversationLogger::new(path),
        (None, Some(dir)) => JsonlConversationLogger::in_dir(dir),
        (None, None) => return Arc::new(NoConversationLogger),
    };

    match logger {
        Some(logger) => {
            info!("Writing transcript to {}", logger.path().display());
            Arc::new(logger)
        }
        None => {
            warn!("Transcript logging disabled: could not open the transcript file");
            Arc::new(NoConversationLogger)
        }
    }
}
