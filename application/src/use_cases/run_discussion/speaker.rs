//! Panel participants.
//!
//! Every participant is an [`Actor`]: a profile plus a shared gateway. The
//! moderator wraps an actor in [`ModeratorActor`], which adds next-speaker
//! selection and the stop predicate. [`Speaker`] lets the orchestrator treat
//! both uniformly when it only needs a turn.

use crate::config::DiscussionConfig;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use panel_domain::{
    ActorProfile, ActorRole, ConversationContext, EndReason, Message, ModelParams,
    PromptTemplate, TurnPolicy, single_line, truncate,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Characters of model output shown in debug logs
const LOG_PREVIEW_LEN: usize = 120;

/// A role-bound participant that produces one message per turn
pub struct Actor<G: LlmGateway + 'static> {
    profile: ActorProfile,
    gateway: Arc<G>,
    params: ModelParams,
    policy: TurnPolicy,
    context_window: usize,
}

impl<G: LlmGateway + 'static> Actor<G> {
    pub fn new(profile: ActorProfile, gateway: Arc<G>, config: &DiscussionConfig) -> Self {
        Self {
            profile,
            gateway,
            params: config.model_params,
            policy: config.turn_policy(),
            context_window: config.context_window,
        }
    }

    pub fn profile(&self) -> &ActorProfile {
        &self.profile
    }

    pub fn role(&self) -> ActorRole {
        self.profile.role
    }

    /// Prompt for this actor's next turn
    pub fn build_prompt(&self, context: &ConversationContext) -> String {
        let hints = self.policy.hints(context);
        let task =
            PromptTemplate::turn_task(self.role(), context, hints, self.policy.end_marker());
        PromptTemplate::actor_prompt(&self.profile, context, self.context_window, &task)
    }

    /// Produce this actor's message for the current context.
    ///
    /// Never fails: a gateway error becomes an error sentinel carrying this
    /// actor's role so the discussion can move on.
    pub async fn respond(&self, context: &ConversationContext) -> Message {
        let turn_index = context.next_turn_index();
        let prompt = self.build_prompt(context);
        debug!(
            "{} generating turn {} ({} prompt chars)",
            self.profile.name,
            turn_index,
            prompt.len()
        );

        let result = self
            .gateway
            .generate(&prompt, &self.params)
            .await
            .and_then(|text| {
                let text = text.trim();
                if text.is_empty() {
                    Err(GatewayError::RequestFailed("empty response".to_string()))
                } else {
                    Ok(text.to_string())
                }
            });

        match result {
            Ok(text) => {
                debug!(
                    "{} responded: {}",
                    self.profile.name,
                    truncate(&single_line(&text), LOG_PREVIEW_LEN)
                );
                Message::new(self.role(), text, turn_index)
            }
            Err(e) => {
                warn!("{} could not respond: {}", self.profile.name, e);
                Message::error_sentinel(self.role(), turn_index)
            }
        }
    }
}

/// The moderator: an actor that also steers the discussion
pub struct ModeratorActor<G: LlmGateway + 'static> {
    actor: Actor<G>,
}

impl<G: LlmGateway + 'static> ModeratorActor<G> {
    pub fn new(gateway: Arc<G>, config: &DiscussionConfig) -> Self {
        Self {
            actor: Actor::new(ActorProfile::for_role(ActorRole::Moderator), gateway, config),
        }
    }

    pub fn actor(&self) -> &Actor<G> {
        &self.actor
    }

    pub fn policy(&self) -> &TurnPolicy {
        &self.actor.policy
    }

    /// Role that speaks next
    pub fn select_next(&self, context: &ConversationContext) -> ActorRole {
        self.policy().select_next(context)
    }

    /// Which stop condition holds for `context`, if any
    pub fn stop_reason(
        &self,
        context: &ConversationContext,
        stop_requested: bool,
    ) -> Option<EndReason> {
        self.policy().stop_reason(context, stop_requested)
    }

    pub fn should_stop(&self, context: &ConversationContext, stop_requested: bool) -> bool {
        self.stop_reason(context, stop_requested).is_some()
    }

    pub async fn respond(&self, context: &ConversationContext) -> Message {
        self.actor.respond(context).await
    }
}

/// Anything that can take a turn
pub enum Speaker<'a, G: LlmGateway + 'static> {
    Regular(&'a Actor<G>),
    Moderator(&'a ModeratorActor<G>),
}

impl<G: LlmGateway + 'static> Speaker<'_, G> {
    pub fn role(&self) -> ActorRole {
        match self {
            Speaker::Regular(actor) => actor.role(),
            Speaker::Moderator(moderator) => moderator.actor().role(),
        }
    }

    pub async fn respond(&self, context: &ConversationContext) -> Message {
        match self {
            Speaker::Regular(actor) => actor.respond(context).await,
            Speaker::Moderator(moderator) => moderator.respond(context).await,
        }
    }

    pub fn as_moderator(&self) -> Option<&ModeratorActor<G>> {
        match self {
            Speaker::Moderator(moderator) => Some(moderator),
            Speaker::Regular(_) => None,
        }
    }
}

/// The full set of participants sharing one gateway
pub struct Panel<G: LlmGateway + 'static> {
    actors: Vec<Actor<G>>,
    moderator: ModeratorActor<G>,
}

impl<G: LlmGateway + 'static> Panel<G> {
    /// Default panel: Questioner, two Experts, Validator and Moderator
    pub fn new(gateway: Arc<G>, config: &DiscussionConfig) -> Self {
        let actors = ActorProfile::panel()
            .into_iter()
            .filter(|profile| profile.role != ActorRole::Moderator)
            .map(|profile| Actor::new(profile, Arc::clone(&gateway), config))
            .collect();

        Self {
            actors,
            moderator: ModeratorActor::new(gateway, config),
        }
    }

    /// Replace the profile of a non-moderator role
    pub fn with_profile(mut self, profile: ActorProfile) -> Self {
        if let Some(actor) = self.actors.iter_mut().find(|a| a.role() == profile.role) {
            actor.profile = profile;
        }
        self
    }

    pub fn moderator(&self) -> &ModeratorActor<G> {
        &self.moderator
    }

    /// Participant for `role`
    pub fn speaker(&self, role: ActorRole) -> Option<Speaker<'_, G>> {
        if role == ActorRole::Moderator {
            return Some(Speaker::Moderator(&self.moderator));
        }
        self.actors
            .iter()
            .find(|actor| actor.role() == role)
            .map(Speaker::Regular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use panel_domain::{ERROR_SENTINEL_TEXT, Model, Topic};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct MockGateway {
        model: Model,
        responses: Mutex<VecDeque<Result<String, GatewayError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                model: Model::default(),
                responses: Mutex::new(VecDeque::from(responses)),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn generate(
            &self,
            prompt: &str,
            _params: &ModelParams,
        ) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::RequestFailed("no more responses".into())))
        }

        async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
            Ok(vec![self.model.clone()])
        }
    }

    fn context() -> ConversationContext {
        ConversationContext::new(Topic::new("Garbage collection").unwrap())
    }

    fn actor(gateway: Arc<MockGateway>, role: ActorRole) -> Actor<MockGateway> {
        Actor::new(
            ActorProfile::for_role(role),
            gateway,
            &DiscussionConfig::default(),
        )
    }

    // ==================== Actor ====================

    #[tokio::test]
    async fn test_respond_returns_model_text() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("  What is a GC root?\n".into())]));
        let questioner = actor(Arc::clone(&gateway), ActorRole::Questioner);

        let msg = questioner.respond(&context()).await;

        assert_eq!(msg.speaker(), ActorRole::Questioner);
        assert_eq!(msg.text(), "What is a GC root?");
        assert_eq!(msg.turn_index(), 0);
        assert!(!msg.is_error());

        let prompts = gateway.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("You are Questioner"));
        assert!(prompts[0].contains("Garbage collection"));
    }

    #[tokio::test]
    async fn test_timeout_becomes_sentinel() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::Timeout(
            Duration::from_secs(1),
        ))]));
        let expert = actor(gateway, ActorRole::Expert1);

        let mut ctx = context();
        ctx.append(Message::new(ActorRole::Questioner, "Q?", 0));
        let msg = expert.respond(&ctx).await;

        assert!(msg.is_error());
        assert_eq!(msg.speaker(), ActorRole::Expert1);
        assert_eq!(msg.text(), ERROR_SENTINEL_TEXT);
        assert_eq!(msg.turn_index(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_becomes_sentinel() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::ModelUnavailable(
            "connection refused".into(),
        ))]));
        let msg = actor(gateway, ActorRole::Validator).respond(&context()).await;
        assert!(msg.is_error());
        assert_eq!(msg.speaker(), ActorRole::Validator);
    }

    #[tokio::test]
    async fn test_empty_response_becomes_sentinel() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("   \n".into())]));
        let msg = actor(gateway, ActorRole::Expert2).respond(&context()).await;
        assert!(msg.is_error());
    }

    #[tokio::test]
    async fn test_respond_does_not_mutate_context() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("answer".into())]));
        let ctx = context();
        let before = ctx.clone();
        actor(gateway, ActorRole::Expert1).respond(&ctx).await;
        assert_eq!(ctx, before);
    }

    #[test]
    fn test_prompt_uses_context_window() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let config = DiscussionConfig::default().with_context_window(2);
        let expert = Actor::new(ActorProfile::for_role(ActorRole::Expert1), gateway, &config);

        let mut ctx = context();
        ctx.append(Message::new(ActorRole::Questioner, "oldest question", 0));
        ctx.append(Message::new(ActorRole::Expert1, "middle answer", 1));
        ctx.append(Message::new(ActorRole::Expert2, "latest answer", 2));

        let prompt = expert.build_prompt(&ctx);
        assert!(!prompt.contains("oldest question"));
        assert!(prompt.contains("Expert 1: middle answer"));
        assert!(prompt.contains("Expert 2: latest answer"));
    }

    // ==================== Moderator & Panel ====================

    #[test]
    fn test_moderator_delegates_to_policy() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let config = DiscussionConfig::default().with_max_rounds(1);
        let moderator = ModeratorActor::new(gateway, &config);

        let mut ctx = context();
        assert_eq!(moderator.select_next(&ctx), ActorRole::Questioner);
        assert!(!moderator.should_stop(&ctx, false));
        assert!(moderator.should_stop(&ctx, true));

        ctx.append(Message::new(ActorRole::Questioner, "Q?", 0));
        assert_eq!(moderator.select_next(&ctx), ActorRole::Expert1);
        assert_eq!(moderator.stop_reason(&ctx, false), Some(EndReason::MaxRounds));
    }

    #[test]
    fn test_moderator_prompt_carries_end_marker() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let config = DiscussionConfig::default().with_end_marker("<<CLOSE>>");
        let moderator = ModeratorActor::new(gateway, &config);
        let prompt = moderator.actor().build_prompt(&context());
        assert!(prompt.contains("You are Moderator"));
        assert!(prompt.contains("<<CLOSE>>"));
    }

    #[test]
    fn test_panel_has_every_role() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let panel = Panel::new(gateway, &DiscussionConfig::default());
        for role in ActorRole::ALL {
            let speaker = panel.speaker(role).unwrap();
            assert_eq!(speaker.role(), role);
            assert_eq!(
                speaker.as_moderator().is_some(),
                role == ActorRole::Moderator
            );
        }
    }

    #[test]
    fn test_panel_with_profile() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let panel = Panel::new(gateway, &DiscussionConfig::default()).with_profile(
            ActorProfile::for_role(ActorRole::Validator).with_description("strict fact checker"),
        );
        match panel.speaker(ActorRole::Validator).unwrap() {
            Speaker::Regular(actor) => {
                assert_eq!(actor.profile().description, "strict fact checker")
            }
            Speaker::Moderator(_) => panic!("validator must be a regular actor"),
        }
    }
}
