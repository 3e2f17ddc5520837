//! REPL (Read-Eval-Print Loop) for interactive discussions
//!
//! Reads a topic per line, runs the discussion while still listening on the
//! same input for `q` (stop), and prompts again once it has ended.

use crate::config::OutputConfig;
use crate::output::console::ConsoleFormatter;
use crate::output::presenter::DiscussionPresenter;
use colored::Colorize;
use panel_application::{
    AiDiscussion, DiscussionError, DiscussionSummary, LlmGateway, event_channel,
};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, warn};

/// Input that exits the session
const QUIT_COMMAND: &str = "quit";
/// Input that stops the running discussion
const STOP_COMMAND: &str = "q";

/// Interactive discussion session
pub struct DiscussionRepl<G: LlmGateway + 'static> {
    discussion: Arc<AiDiscussion<G>>,
    output: OutputConfig,
}

impl<G: LlmGateway + 'static> DiscussionRepl<G> {
    pub fn new(discussion: Arc<AiDiscussion<G>>, output: OutputConfig) -> Self {
        Self { discussion, output }
    }

    /// Run the interactive session on stdin
    pub async fn run(&self) -> io::Result<()> {
        let lines = BufReader::new(tokio::io::stdin()).lines();
        self.run_with_input(lines).await
    }

    /// Run the interactive session on any line source
    pub async fn run_with_input<R>(&self, mut lines: Lines<R>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.print_welcome();

        loop {
            print!("{} ", "Topic>".bold());
            io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                println!("Bye!");
                break;
            };

            let topic = line.trim();
            if topic.is_empty() {
                continue;
            }
            if topic.eq_ignore_ascii_case(QUIT_COMMAND) {
                println!("Bye!");
                break;
            }

            println!(
                "{}",
                format!("Type '{}' and press Enter to stop the discussion.", STOP_COMMAND).dimmed()
            );
            if let Err(e) = self.discuss(topic, &mut lines, true).await {
                eprintln!("{}", ConsoleFormatter::error(&e.to_string()));
            }
            println!("{}", "Discussion finished!".green().bold());
            println!();
        }

        Ok(())
    }

    /// Run a single discussion without reading input; Ctrl-C stops it
    pub async fn run_once(&self, topic: &str) -> Result<DiscussionSummary, DiscussionError> {
        let mut lines = BufReader::new(tokio::io::empty()).lines();
        self.discuss(topic, &mut lines, false).await
    }

    fn print_welcome(&self) {
        let policy = self.discussion.panel().moderator().policy();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            AI Discussion Panel              │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Up to {} turns per discussion.", policy.max_rounds());
        println!(
            "Enter a topic to start, '{}' to stop a running discussion, '{}' to exit.",
            STOP_COMMAND, QUIT_COMMAND
        );
        println!();
    }

    async fn discuss<R>(
        &self,
        topic: &str,
        lines: &mut Lines<R>,
        read_input: bool,
    ) -> Result<DiscussionSummary, DiscussionError>
    where
        R: AsyncBufRead + Unpin,
    {
        let max_rounds = self.discussion.panel().moderator().policy().max_rounds();
        let mut presenter = DiscussionPresenter::new(&self.output, max_rounds);
        let (tx, mut rx) = event_channel();

        let run = self.discussion.start(topic, tx);
        tokio::pin!(run);
        // Created once so a Ctrl-C during another branch stays pending
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut input_open = read_input;
        let mut stop_sent = false;

        let result = loop {
            tokio::select! {
                biased;

                result = &mut run => break result,

                Some(event) = rx.recv() => presenter.present(&event),

                line = lines.next_line(), if input_open => match line {
                    Ok(Some(line)) if line.trim().eq_ignore_ascii_case(STOP_COMMAND) => {
                        if !stop_sent {
                            println!("{}", "Stopping after the current turn...".yellow());
                            self.discussion.stop();
                            stop_sent = true;
                        }
                    }
                    Ok(Some(line)) => debug!("Ignoring input during discussion: {:?}", line),
                    Ok(None) => input_open = false,
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        input_open = false;
                    }
                },

                signal = &mut ctrl_c, if !stop_sent => {
                    if let Err(e) = signal {
                        warn!("Failed to listen for Ctrl-C: {}", e);
                    } else {
                        println!("{}", "Stopping after the current turn...".yellow());
                        self.discussion.stop();
                    }
                    stop_sent = true;
                }
            }
        };

        // Events published by the final turn may still be queued
        while let Ok(event) = rx.try_recv() {
            presenter.present(&event);
        }

        result
    }
}
