//! Discussion event channel
//!
//! The output port from the orchestrator to presentation adapters. The
//! orchestrator publishes every event before the next turn begins, so the
//! order on the channel is the order of the transcript.

use panel_domain::{ActorRole, EndReason, Message};
use tokio::sync::mpsc;

/// Events published while a discussion runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscussionEvent {
    /// A new discussion began
    Started { topic: String },
    /// The selected actor is about to generate its message
    TurnStarted { role: ActorRole, turn_index: usize },
    /// A message was appended to the transcript
    Message {
        role: ActorRole,
        text: String,
        turn_index: usize,
        is_error: bool,
    },
    /// The discussion ended
    Ended { reason: EndReason, rounds: usize },
}

impl DiscussionEvent {
    pub fn from_message(message: &Message) -> Self {
        DiscussionEvent::Message {
            role: message.speaker(),
            text: message.text().to_string(),
            turn_index: message.turn_index(),
            is_error: message.is_error(),
        }
    }
}

/// Sender half handed to [`AiDiscussion::start`](crate::AiDiscussion::start)
pub type EventSender = mpsc::UnboundedSender<DiscussionEvent>;
/// Receiver half held by a presentation adapter
pub type EventReceiver = mpsc::UnboundedReceiver<DiscussionEvent>;

/// Create a new event channel
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Publishes events, tolerating a subscriber that went away.
pub(crate) struct EventPublisher {
    sender: EventSender,
}

impl EventPublisher {
    pub(crate) fn new(sender: EventSender) -> Self {
        Self { sender }
    }

    pub(crate) fn publish(&self, event: DiscussionEvent) {
        // A dropped receiver only means nobody is watching
        if self.sender.send(event).is_err() {
            tracing::trace!("Discussion event dropped: no subscriber");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_message() {
        let msg = Message::error_sentinel(ActorRole::Expert2, 4);
        let event = DiscussionEvent::from_message(&msg);
        assert_eq!(
            event,
            DiscussionEvent::Message {
                role: ActorRole::Expert2,
                text: msg.text().to_string(),
                turn_index: 4,
                is_error: true,
            }
        );
    }

    #[test]
    fn test_publish_keeps_order() {
        let (tx, mut rx) = event_channel();
        let publisher = EventPublisher::new(tx);
        publisher.publish(DiscussionEvent::Started {
            topic: "t".to_string(),
        });
        publisher.publish(DiscussionEvent::TurnStarted {
            role: ActorRole::Questioner,
            turn_index: 0,
        });

        assert!(matches!(rx.try_recv(), Ok(DiscussionEvent::Started { .. })));
        assert!(matches!(
            rx.try_recv(),
            Ok(DiscussionEvent::TurnStarted { turn_index: 0, .. })
        ));
    }

    #[test]
    fn test_publish_without_subscriber_does_not_panic() {
        let (tx, rx) = event_channel();
        drop(rx);
        let publisher = EventPublisher::new(tx);
        publisher.publish(DiscussionEvent::Ended {
            reason: EndReason::MaxRounds,
            rounds: 20,
        });
    }
}
