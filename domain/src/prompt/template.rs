//! Prompt templates for panel turns

use crate::core::role::ActorRole;
use crate::discussion::context::ConversationContext;
use crate::discussion::message::Message;
use crate::discussion::profile::ActorProfile;

/// Style hints for a single turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnHints {
    /// Short discussions ask for concise answers
    pub brief: bool,
    /// The discussion is in its final cycle
    pub closing: bool,
}

/// Templates for generating the prompt of each turn
pub struct PromptTemplate;

impl PromptTemplate {
    /// Fixed persona line opening every prompt
    pub fn role_instructions(profile: &ActorProfile) -> String {
        format!("You are {}, a {}.", profile.name, profile.description)
    }

    /// Role-labeled, chronological transcript lines.
    ///
    /// Failed turns are left out so that placeholder text never reaches the model.
    pub fn transcript(messages: &[Message]) -> String {
        let lines: Vec<String> = messages
            .iter()
            .filter(|m| !m.is_error())
            .map(|m| format!("{}: {}", m.speaker().display_name(), m.text().trim()))
            .collect();

        if lines.is_empty() {
            "(the discussion has not started yet)".to_string()
        } else {
            lines.join("\n")
        }
    }

    fn style_note(hints: TurnHints) -> &'static str {
        if hints.brief {
            "Provide a brief, focused response."
        } else {
            "Feel free to provide detailed explanations."
        }
    }

    /// What the given role is asked to do this turn
    pub fn turn_task(
        role: ActorRole,
        context: &ConversationContext,
        hints: TurnHints,
        end_marker: &str,
    ) -> String {
        let topic = context.topic().content();
        let style = Self::style_note(hints);

        match role {
            ActorRole::Questioner => {
                if context.last_message_from(ActorRole::Moderator).is_some() {
                    format!(
                        "Ask a relevant question about {}, following the moderator's latest direction. {}",
                        topic, style
                    )
                } else {
                    format!("Ask an opening question about {}. {}", topic, style)
                }
            }
            ActorRole::Expert1 => {
                if hints.closing {
                    format!("Provide a final summary or key insights about {}. {}", topic, style)
                } else {
                    format!(
                        "Provide your expert insight on the latest question or point raised about {}. {}",
                        topic, style
                    )
                }
            }
            ActorRole::Expert2 => {
                if hints.closing {
                    format!(
                        "Complete the final summary about {} with anything Expert 1 missed. {}",
                        topic, style
                    )
                } else {
                    format!(
                        "Enhance or optimize Expert 1's latest answer about {}. Correct it where it is wrong. {}",
                        topic, style
                    )
                }
            }
            ActorRole::Validator => {
                if hints.closing {
                    format!(
                        "Give a final assessment of the discussion's completeness and accuracy. {}",
                        style
                    )
                } else {
                    format!(
                        "Validate the recent questions and answers about {}. Are they relevant and accurate? {}",
                        topic, style
                    )
                }
            }
            ActorRole::Moderator => {
                let mut task = format!(
                    "Review the discussion so far about '{}'. If important aspects remain open, \
pose one new focused sub-question for the Questioner to explore next. \
If the topic has been covered thoroughly, reply with {} followed by a one-sentence closing remark. {}",
                    topic, end_marker, style
                );
                if hints.closing {
                    task.push_str(&format!(
                        "\nThe discussion is nearly over: close it with {} unless a critical point is still unresolved.",
                        end_marker
                    ));
                }
                task
            }
        }
    }

    /// Full prompt for one actor turn
    pub fn actor_prompt(
        profile: &ActorProfile,
        context: &ConversationContext,
        window: usize,
        task: &str,
    ) -> String {
        format!(
            r#"{}
Topic of the discussion: {}

Previous context:
{}

Current task: {}

Respond in character as {}, the {}."#,
            Self::role_instructions(profile),
            context.topic().content(),
            Self::transcript(context.recent(window)),
            task,
            profile.name,
            profile.description,
        )
    }
}
