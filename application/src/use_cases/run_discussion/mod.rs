//! Run Discussion use case
//!
//! Drives a panel discussion turn by turn:
//!
//! ```text
//! start(topic)
//!   loop until the moderator's stop condition holds:
//!     select next role -> actor responds -> append -> publish
//!   Stopped + Ended event
//! ```
//!
//! The loop is the only writer of the transcript. Each actor reads the
//! context as it stood when its turn began. `stop()` can be called from any
//! task; it is observed at the next turn boundary, so a model call that is
//! already in flight always completes.

mod speaker;
mod types;

pub use speaker::{Actor, ModeratorActor, Panel, Speaker};
pub use types::{DiscussionError, DiscussionSession, DiscussionSummary};

use crate::config::DiscussionConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::discussion_events::{DiscussionEvent, EventPublisher, EventSender};
use crate::ports::llm_gateway::LlmGateway;
use panel_domain::{ConversationContext, DiscussionState, Message, Topic};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Mutable run state shared between the loop and external callers
#[derive(Default)]
struct RunState {
    state: DiscussionState,
    context: Option<ConversationContext>,
    session: Option<DiscussionSession>,
}

/// Marks the discussion stopped even if the loop future is dropped mid-turn
struct RunGuard<'a> {
    run: &'a Mutex<RunState>,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let mut run = self.run.lock().unwrap_or_else(PoisonError::into_inner);
        if run.state.is_active() {
            run.state = DiscussionState::Stopped;
            run.session = None;
        }
    }
}

/// Orchestrator of a panel discussion
pub struct AiDiscussion<G: LlmGateway + 'static> {
    panel: Panel<G>,
    run: Mutex<RunState>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> AiDiscussion<G> {
    pub fn new(gateway: Arc<G>, config: DiscussionConfig) -> Self {
        Self::with_panel(Panel::new(gateway, &config))
    }

    pub fn with_panel(panel: Panel<G>) -> Self {
        info!(
            "Initializing AI discussion (max_rounds={})",
            panel.moderator().policy().max_rounds()
        );
        Self {
            panel,
            run: Mutex::new(RunState::default()),
            logger: Arc::new(NoConversationLogger),
        }
    }

    /// Record every discussion event with `logger`
    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn panel(&self) -> &Panel<G> {
        &self.panel
    }

    fn lock(&self) -> MutexGuard<'_, RunState> {
        self.run.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Read Access ====================

    pub fn state(&self) -> DiscussionState {
        self.lock().state
    }

    /// Snapshot of the current (or last) discussion's context
    pub fn context(&self) -> Option<ConversationContext> {
        self.lock().context.clone()
    }

    pub fn transcript(&self) -> Vec<Message> {
        self.lock()
            .context
            .as_ref()
            .map(|c| c.transcript().to_vec())
            .unwrap_or_default()
    }

    pub fn round_count(&self) -> usize {
        self.lock()
            .context
            .as_ref()
            .map(ConversationContext::round_count)
            .unwrap_or(0)
    }

    // ==================== Control ====================

    /// Run a discussion on `topic` to completion.
    ///
    /// Events are published on `events` in transcript order. Fails with
    /// [`DiscussionError::AlreadyRunning`] while another discussion is
    /// running or stopping; the running discussion is left untouched.
    pub async fn start(
        &self,
        topic: impl Into<String>,
        events: EventSender,
    ) -> Result<DiscussionSummary, DiscussionError> {
        let topic = Topic::new(topic).map_err(|e| DiscussionError::InvalidTopic(e.to_string()))?;

        let session = {
            let mut run = self.lock();
            if !run.state.can_start() {
                warn!("Rejected start while discussion is {}", run.state);
                return Err(DiscussionError::AlreadyRunning);
            }
            let session = DiscussionSession::new();
            run.state = DiscussionState::Running;
            run.context = Some(ConversationContext::new(topic.clone()));
            run.session = Some(session.clone());
            session
        };
        let guard = RunGuard { run: &self.run };
        let publisher = EventPublisher::new(events);
        let moderator = self.panel.moderator();

        info!(
            "Starting new discussion on topic: '{}' (max_rounds={}, session={})",
            topic,
            moderator.policy().max_rounds(),
            session.id()
        );
        self.logger.log(
            session.id(),
            &ConversationEvent::DiscussionStarted {
                topic: topic.content().to_string(),
                max_rounds: moderator.policy().max_rounds(),
            },
        );
        publisher.publish(DiscussionEvent::Started {
            topic: topic.content().to_string(),
        });

        let mut context = ConversationContext::new(topic);
        let reason = loop {
            let stop_requested = session.is_stop_requested() || !self.is_running();
            if let Some(reason) = moderator.stop_reason(&context, stop_requested) {
                break reason;
            }

            let role = moderator.select_next(&context);
            let turn_index = context.next_turn_index();
            debug!(
                "Round {}/{}: {} speaks",
                turn_index + 1,
                moderator.policy().max_rounds(),
                role
            );
            publisher.publish(DiscussionEvent::TurnStarted { role, turn_index });

            let message = match self.panel.speaker(role) {
                Some(speaker) => speaker.respond(&context).await,
                None => {
                    warn!("No participant for role {}", role);
                    Message::error_sentinel(role, turn_index)
                }
            };

            context.append(message.clone());
            self.lock().context = Some(context.clone());

            self.logger
                .log(session.id(), &ConversationEvent::turn(&message));
            publisher.publish(DiscussionEvent::from_message(&message));
        };

        {
            let mut run = self.lock();
            run.state = DiscussionState::Stopped;
            run.session = None;
        }
        drop(guard);

        let rounds = context.round_count();
        info!("Discussion ended after {} rounds ({})", rounds, reason);
        self.logger.log(
            session.id(),
            &ConversationEvent::DiscussionEnded { reason, rounds },
        );
        publisher.publish(DiscussionEvent::Ended { reason, rounds });

        Ok(DiscussionSummary {
            session_id: session.id().to_string(),
            context,
            reason,
        })
    }

    /// Request the running discussion to stop after the current turn.
    ///
    /// No-op unless a discussion is running.
    pub fn stop(&self) {
        let mut run = self.lock();
        if run.state != DiscussionState::Running {
            debug!("Ignoring stop: discussion is {}", run.state);
            return;
        }
        run.state = DiscussionState::Stopping;
        if let Some(session) = &run.session {
            session.request_stop();
        }
        info!("Discussion stopped by user");
    }

    fn is_running(&self) -> bool {
        self.lock().state == DiscussionState::Running
    }
}
