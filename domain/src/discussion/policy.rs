//! Turn-taking policy: who speaks next and when the discussion ends.
//!
//! The policy is rule-based and fully deterministic. The next speaker depends
//! only on who spoke last:
//!
//! | State | Last speaker | Next |
//! |-------|--------------|------|
//! | `Start` | (none) | Questioner |
//! | `QuestionAsked` | Questioner | Expert 1 |
//! | `ExpertAnswered` | Expert 1 | Expert 2 |
//! | `ExpertAugmented` | Expert 2 | Validator |
//! | `Validated` | Validator | Moderator |
//! | `Moderating` | Moderator | Questioner |
//!
//! A failed turn still carries its speaker's role, so the cycle advances past
//! an unavailable model instead of retrying it.

use crate::core::role::ActorRole;
use crate::discussion::context::ConversationContext;
use crate::prompt::TurnHints;
use serde::{Deserialize, Serialize};

/// Position in the speaking cycle, derived from the last speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    Start,
    QuestionAsked,
    ExpertAnswered,
    ExpertAugmented,
    Validated,
    Moderating,
}

impl TurnState {
    pub fn from_last_speaker(last: Option<ActorRole>) -> Self {
        match last {
            None => TurnState::Start,
            Some(ActorRole::Questioner) => TurnState::QuestionAsked,
            Some(ActorRole::Expert1) => TurnState::ExpertAnswered,
            Some(ActorRole::Expert2) => TurnState::ExpertAugmented,
            Some(ActorRole::Validator) => TurnState::Validated,
            Some(ActorRole::Moderator) => TurnState::Moderating,
        }
    }

    pub fn of(context: &ConversationContext) -> Self {
        Self::from_last_speaker(context.last_speaker())
    }

    /// Role that speaks when the discussion is in this state
    pub fn next_role(&self) -> ActorRole {
        match self {
            TurnState::Start => ActorRole::Questioner,
            TurnState::QuestionAsked => ActorRole::Expert1,
            TurnState::ExpertAnswered => ActorRole::Expert2,
            TurnState::ExpertAugmented => ActorRole::Validator,
            TurnState::Validated => ActorRole::Moderator,
            TurnState::Moderating => ActorRole::Questioner,
        }
    }
}

/// Why a discussion ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// `stop()` was called by an adapter
    StopRequested,
    /// The moderator closed the discussion with the end marker
    EndMarker,
    /// The round limit was reached
    MaxRounds,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::StopRequested => "stop_requested",
            EndReason::EndMarker => "end_marker",
            EndReason::MaxRounds => "max_rounds",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EndReason::StopRequested => "Discussion stopped by user.",
            EndReason::EndMarker => "Discussion complete. Topic has been thoroughly covered.",
            EndReason::MaxRounds => "Discussion complete. Maximum number of rounds reached.",
        }
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selection and stopping rules applied by the moderator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPolicy {
    max_rounds: usize,
    end_marker: String,
}

impl Default for TurnPolicy {
    fn default() -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            end_marker: Self::DEFAULT_END_MARKER.to_string(),
        }
    }
}

impl TurnPolicy {
    pub const DEFAULT_MAX_ROUNDS: usize = 20;
    pub const DEFAULT_END_MARKER: &'static str = "[END OF DISCUSSION]";

    /// Discussions at or below this many rounds ask for brief answers
    pub const BRIEF_ROUND_LIMIT: usize = 10;

    pub fn new(max_rounds: usize, end_marker: impl Into<String>) -> Self {
        Self {
            max_rounds,
            end_marker: end_marker.into(),
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_end_marker(mut self, end_marker: impl Into<String>) -> Self {
        self.end_marker = end_marker.into();
        self
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn end_marker(&self) -> &str {
        &self.end_marker
    }

    /// Next speaker for the current context
    pub fn select_next(&self, context: &ConversationContext) -> ActorRole {
        TurnState::of(context).next_role()
    }

    /// Which stop condition holds, if any.
    ///
    /// Checked in order: external stop, end marker, round limit.
    pub fn stop_reason(
        &self,
        context: &ConversationContext,
        stop_requested: bool,
    ) -> Option<EndReason> {
        if stop_requested {
            return Some(EndReason::StopRequested);
        }
        let closed_by_moderator = context
            .last_message_from(ActorRole::Moderator)
            .filter(|m| !m.is_error())
            .is_some_and(|m| self.contains_end_marker(m.text()));
        if closed_by_moderator {
            return Some(EndReason::EndMarker);
        }
        if context.round_count() >= self.max_rounds {
            return Some(EndReason::MaxRounds);
        }
        None
    }

    pub fn should_stop(&self, context: &ConversationContext, stop_requested: bool) -> bool {
        self.stop_reason(context, stop_requested).is_some()
    }

    /// Case-insensitive search for the end marker
    pub fn contains_end_marker(&self, text: &str) -> bool {
        let marker = self.end_marker.trim();
        !marker.is_empty() && text.to_lowercase().contains(&marker.to_lowercase())
    }

    pub fn remaining_rounds(&self, context: &ConversationContext) -> usize {
        self.max_rounds.saturating_sub(context.round_count())
    }

    /// Style hints for the turn about to be taken.
    ///
    /// Closing hints start within the last cycle, and never before every
    /// role has spoken once.
    pub fn hints(&self, context: &ConversationContext) -> TurnHints {
        let cycle = ActorRole::ALL.len();
        TurnHints {
            brief: self.max_rounds <= Self::BRIEF_ROUND_LIMIT,
            closing: context.round_count() >= cycle && self.remaining_rounds(context) <= cycle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::topic::Topic;
    use crate::discussion::message::Message;

    fn context_with(speakers: &[ActorRole]) -> ConversationContext {
        let mut ctx = ConversationContext::new(Topic::new("Test topic").unwrap());
        for role in speakers {
            let index = ctx.next_turn_index();
            ctx.append(Message::new(*role, "text", index));
        }
        ctx
    }

    #[test]
    fn test_transition_table() {
        let policy = TurnPolicy::default();
        let cases = [
            (vec![], ActorRole::Questioner),
            (vec![ActorRole::Questioner], ActorRole::Expert1),
            (vec![ActorRole::Questioner, ActorRole::Expert1], ActorRole::Expert2),
            (
                vec![ActorRole::Questioner, ActorRole::Expert1, ActorRole::Expert2],
                ActorRole::Validator,
            ),
            (vec![ActorRole::Validator], ActorRole::Moderator),
            (vec![ActorRole::Moderator], ActorRole::Questioner),
        ];
        for (speakers, expected) in cases {
            assert_eq!(policy.select_next(&context_with(&speakers)), expected);
        }
    }

    #[test]
    fn test_select_next_is_deterministic() {
        let policy = TurnPolicy::default();
        let ctx = context_with(&[ActorRole::Questioner, ActorRole::Expert1]);
        let first = policy.select_next(&ctx);
        for _ in 0..100 {
            assert_eq!(policy.select_next(&ctx), first);
        }
    }

    #[test]
    fn test_sentinel_advances_to_next_role() {
        let policy = TurnPolicy::default();
        let mut ctx = context_with(&[]);
        ctx.append(Message::error_sentinel(ActorRole::Questioner, 0));
        assert_eq!(policy.select_next(&ctx), ActorRole::Expert1);
    }

    #[test]
    fn test_turn_state_from_last_speaker() {
        assert_eq!(TurnState::from_last_speaker(None), TurnState::Start);
        assert_eq!(
            TurnState::from_last_speaker(Some(ActorRole::Expert2)),
            TurnState::ExpertAugmented
        );
        assert_eq!(
            TurnState::from_last_speaker(Some(ActorRole::Moderator)),
            TurnState::Moderating
        );
    }

    #[test]
    fn test_stops_on_round_limit_only() {
        let policy = TurnPolicy::default().with_max_rounds(3);
        let ctx = context_with(&[ActorRole::Questioner, ActorRole::Expert1]);
        assert!(!policy.should_stop(&ctx, false));

        let ctx = context_with(&[ActorRole::Questioner, ActorRole::Expert1, ActorRole::Expert2]);
        assert_eq!(policy.stop_reason(&ctx, false), Some(EndReason::MaxRounds));
    }

    #[test]
    fn test_default_round_limit_is_twenty() {
        let policy = TurnPolicy::default();
        let nineteen: Vec<_> = ActorRole::ALL
            .into_iter()
            .filter(|r| *r != ActorRole::Moderator)
            .cycle()
            .take(19)
            .collect();
        assert!(!policy.should_stop(&context_with(&nineteen), false));

        let twenty: Vec<_> = ActorRole::ALL
            .into_iter()
            .filter(|r| *r != ActorRole::Moderator)
            .cycle()
            .take(20)
            .collect();
        assert_eq!(
            policy.stop_reason(&context_with(&twenty), false),
            Some(EndReason::MaxRounds)
        );
    }

    #[test]
    fn test_stops_on_end_marker_only() {
        let policy = TurnPolicy::default();
        let mut ctx = context_with(&[ActorRole::Questioner]);
        ctx.append(Message::new(
            ActorRole::Moderator,
            "We covered everything. [end of discussion] Thanks all.",
            1,
        ));
        assert_eq!(policy.stop_reason(&ctx, false), Some(EndReason::EndMarker));
    }

    #[test]
    fn test_end_marker_from_other_role_is_ignored() {
        let policy = TurnPolicy::default();
        let mut ctx = context_with(&[]);
        ctx.append(Message::new(
            ActorRole::Expert1,
            "[END OF DISCUSSION]",
            0,
        ));
        assert!(!policy.should_stop(&ctx, false));
    }

    #[test]
    fn test_stops_on_external_request_only() {
        let policy = TurnPolicy::default();
        let ctx = context_with(&[ActorRole::Questioner]);
        assert!(!policy.should_stop(&ctx, false));
        assert_eq!(policy.stop_reason(&ctx, true), Some(EndReason::StopRequested));
    }

    #[test]
    fn test_custom_end_marker() {
        let policy = TurnPolicy::default().with_end_marker("NEXT: DONE");
        let mut ctx = context_with(&[]);
        ctx.append(Message::new(ActorRole::Moderator, "next: done", 0));
        assert!(policy.should_stop(&ctx, false));
    }

    #[test]
    fn test_hints() {
        let policy = TurnPolicy::default().with_max_rounds(8);
        let ctx = context_with(&[ActorRole::Questioner]);
        let hints = policy.hints(&ctx);
        assert!(hints.brief);
        // 7 rounds left, more than one cycle
        assert!(!hints.closing);

        let ctx = context_with(&ActorRole::ALL);
        assert!(policy.hints(&ctx).closing);

        let long = TurnPolicy::default();
        assert!(!long.hints(&ctx).brief);
    }

    #[test]
    fn test_short_discussion_has_no_closing_before_first_cycle() {
        let policy = TurnPolicy::default().with_max_rounds(3);
        let mut ctx = context_with(&[]);
        for role in [ActorRole::Questioner, ActorRole::Expert1, ActorRole::Expert2] {
            assert!(!policy.hints(&ctx).closing);
            let index = ctx.next_turn_index();
            ctx.append(Message::new(role, "text", index));
        }

        // 6 rounds: remaining <= 5 from the start, closing only after a full cycle
        let policy = TurnPolicy::default().with_max_rounds(6);
        let ctx = context_with(&[ActorRole::Questioner]);
        assert!(!policy.hints(&ctx).closing);
        let ctx = context_with(&ActorRole::ALL);
        assert!(policy.hints(&ctx).closing);
    }
}
