//! Prints discussion events as they arrive

use crate::config::OutputConfig;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::TurnProgress;
use panel_application::DiscussionEvent;

/// Console subscriber of the discussion event channel
pub struct DiscussionPresenter {
    progress: Option<TurnProgress>,
}

impl DiscussionPresenter {
    pub fn new(config: &OutputConfig, max_rounds: usize) -> Self {
        Self {
            progress: config
                .show_progress
                .then(|| TurnProgress::new(max_rounds)),
        }
    }

    pub fn present(&mut self, event: &DiscussionEvent) {
        if let DiscussionEvent::TurnStarted { role, turn_index } = event {
            if let Some(progress) = self.progress.as_mut() {
                progress.on_turn_start(*role, *turn_index);
            }
            return;
        }

        if let Some(progress) = self.progress.as_mut() {
            progress.clear();
        }
        if let Some(text) = ConsoleFormatter::format_event(event) {
            println!("{}", text);
        }
    }
}
