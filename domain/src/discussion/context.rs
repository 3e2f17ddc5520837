//! Shared conversation context

use crate::core::role::ActorRole;
use crate::core::topic::Topic;
use crate::discussion::message::Message;
use serde::{Deserialize, Serialize};

/// Transcript and round counter of one discussion (Entity)
///
/// The transcript is append-only and `round_count` moves in lockstep with it:
/// `transcript().len() == round_count()` holds at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    topic: Topic,
    transcript: Vec<Message>,
    round_count: usize,
}

impl ConversationContext {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            transcript: Vec::new(),
            round_count: 0,
        }
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn round_count(&self) -> usize {
        self.round_count
    }

    /// Turn index the next appended message should carry
    pub fn next_turn_index(&self) -> usize {
        self.round_count
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    /// Append a completed turn's message and count the round
    pub fn append(&mut self, message: Message) {
        self.transcript.push(message);
        self.round_count += 1;
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.transcript.last()
    }

    pub fn last_speaker(&self) -> Option<ActorRole> {
        self.last_message().map(Message::speaker)
    }

    /// Most recent message spoken by `role`, if any
    pub fn last_message_from(&self, role: ActorRole) -> Option<&Message> {
        self.transcript.iter().rev().find(|m| m.speaker() == role)
    }

    /// The last `window` messages in speaking order; `0` means the whole transcript
    pub fn recent(&self, window: usize) -> &[Message] {
        if window == 0 || window >= self.transcript.len() {
            &self.transcript
        } else {
            &self.transcript[self.transcript.len() - window..]
        }
    }

    /// Consume the context, returning its transcript
    pub fn into_transcript(self) -> Vec<Message> {
        self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ConversationContext {
        ConversationContext::new(Topic::new("Rust lifetimes").unwrap())
    }

    #[test]
    fn test_new_context_is_empty() {
        let ctx = context();
        assert!(ctx.is_empty());
        assert_eq!(ctx.round_count(), 0);
        assert_eq!(ctx.next_turn_index(), 0);
        assert!(ctx.last_speaker().is_none());
    }

    #[test]
    fn test_append_keeps_length_equal_to_round_count() {
        let mut ctx = context();
        for (i, role) in ActorRole::ALL.into_iter().enumerate() {
            ctx.append(Message::new(role, format!("turn {i}"), ctx.next_turn_index()));
            assert_eq!(ctx.transcript().len(), ctx.round_count());
        }
        assert_eq!(ctx.round_count(), 5);
        assert_eq!(ctx.last_speaker(), Some(ActorRole::Moderator));
        assert_eq!(ctx.transcript()[2].turn_index(), 2);
    }

    #[test]
    fn test_recent_window() {
        let mut ctx = context();
        for i in 0..8 {
            ctx.append(Message::new(ActorRole::Questioner, format!("m{i}"), i));
        }
        let recent = ctx.recent(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].text(), "m3");
        assert_eq!(recent[4].text(), "m7");
        assert_eq!(ctx.recent(0).len(), 8);
        assert_eq!(ctx.recent(20).len(), 8);
    }

    #[test]
    fn test_last_message_from() {
        let mut ctx = context();
        ctx.append(Message::new(ActorRole::Moderator, "first", 0));
        ctx.append(Message::new(ActorRole::Questioner, "q", 1));
        ctx.append(Message::new(ActorRole::Moderator, "second", 2));
        ctx.append(Message::new(ActorRole::Questioner, "q2", 3));

        let last = ctx.last_message_from(ActorRole::Moderator).unwrap();
        assert_eq!(last.text(), "second");
        assert!(ctx.last_message_from(ActorRole::Validator).is_none());
    }
}
