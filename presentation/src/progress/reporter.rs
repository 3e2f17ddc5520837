//! Progress reporting while an actor is thinking

use crate::output::console::ConsoleFormatter;
use indicatif::{ProgressBar, ProgressStyle};
use panel_domain::ActorRole;
use std::time::Duration;

/// Spinner shown between a turn's start and its message
pub struct TurnProgress {
    spinner: Option<ProgressBar>,
    max_rounds: usize,
}

impl TurnProgress {
    pub fn new(max_rounds: usize) -> Self {
        Self {
            spinner: None,
            max_rounds,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.dim} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Text shown next to the spinner
    pub fn thinking_message(role: ActorRole) -> String {
        format!("{} is thinking...", ConsoleFormatter::role_label(role))
    }

    pub fn on_turn_start(&mut self, role: ActorRole, turn_index: usize) {
        self.clear();

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("[{}/{}]", turn_index + 1, self.max_rounds));
        pb.set_message(Self::thinking_message(role));
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(pb);
    }

    /// Remove the spinner before regular output is printed
    pub fn clear(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for TurnProgress {
    fn drop(&mut self) {
        self.clear();
    }
}
