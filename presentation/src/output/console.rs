//! Console output formatter for discussion events

use colored::{ColoredString, Colorize};
use panel_application::DiscussionEvent;
use panel_domain::{ActorRole, EndReason, Model};

/// Formats discussion events for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render one event, or `None` for events with no console output
    pub fn format_event(event: &DiscussionEvent) -> Option<String> {
        match event {
            DiscussionEvent::Started { topic } => Some(Self::header(topic)),
            DiscussionEvent::TurnStarted { .. } => None,
            DiscussionEvent::Message {
                role,
                text,
                is_error,
                ..
            } => Some(Self::message(*role, text, *is_error)),
            DiscussionEvent::Ended { reason, rounds } => Some(Self::footer(*reason, *rounds)),
        }
    }

    /// Role-colored speaker label
    pub fn role_label(role: ActorRole) -> ColoredString {
        let name = role.display_name();
        match role {
            ActorRole::Questioner => name.cyan().bold(),
            ActorRole::Expert1 => name.green().bold(),
            ActorRole::Expert2 => name.blue().bold(),
            ActorRole::Validator => name.magenta().bold(),
            ActorRole::Moderator => name.yellow().bold(),
        }
    }

    /// A transcript entry; failed turns are shown in red
    pub fn message(role: ActorRole, text: &str, is_error: bool) -> String {
        if is_error {
            format!("{}\n{}\n", role.display_name().red().bold(), text.red())
        } else {
            format!("{}\n{}\n", Self::role_label(role), text.trim())
        }
    }

    pub fn header(topic: &str) -> String {
        format!(
            "\n{}\n{} {}\n",
            "=== AI Discussion Panel ===".cyan().bold(),
            "Topic:".bold(),
            topic
        )
    }

    pub fn footer(reason: EndReason, rounds: usize) -> String {
        let summary = format!("Discussion ended after {} rounds: {}", rounds, reason.description());
        match reason {
            EndReason::StopRequested => summary.yellow().to_string(),
            EndReason::EndMarker | EndReason::MaxRounds => summary.green().to_string(),
        }
    }

    /// List of installed models for `--list-models`
    pub fn models(models: &[Model], current: &Model) -> String {
        if models.is_empty() {
            return "No models installed. Pull one with `ollama pull <model>`.".to_string();
        }

        let mut output = format!("{}\n", "Installed models:".cyan().bold());
        for model in models {
            let selected = model == current || model.family() == current.as_str();
            if selected {
                output.push_str(&format!("  * {} {}\n", model, "(selected)".green()));
            } else {
                output.push_str(&format!("    {}\n", model));
            }
        }
        output
    }

    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }
}
