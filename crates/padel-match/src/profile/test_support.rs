use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::domain::{
    AttributeTargets, Budget, CourtType, Experience, Frequency, Gender, Injury, PlayStyle,
    PlayerProfile, Position, QuizAnswers, SessionId,
};
use super::profiler::{AttributeInference, AttributeProfiler, ProfilerError};
use super::repository::{ProfileStore, StoreError};
use crate::llm::{CompletionOptions, LlmError, LlmProvider, Message};

pub(crate) fn answers() -> QuizAnswers {
    QuizAnswers {
        age: 34,
        gender: Gender::Female,
        height: Some(168),
        weight: Some(62.0),
        injuries: BTreeSet::from([Injury::None]),
        frequency: Frequency::SeveralPerWeek,
        experience: Experience::Intermediate,
        court_type: CourtType::Indoor,
        budget: Budget::Performance,
        position: Some(Position::Right),
        style: Some(PlayStyle::Offensive),
        smash_frequency: None,
        net_style: None,
        baseline_style: None,
        game_pace: None,
        touch_preference: None,
        weight_preference: None,
    }
}

pub(crate) fn profile() -> PlayerProfile {
    PlayerProfile::new(
        answers(),
        AttributeTargets {
            power: 8,
            control: 6,
            comfort: 6,
            maneuverability: 7,
            rigidity: 7,
            sweetspot: 6,
        },
        "Perfil ofensivo con buena base física.".to_string(),
    )
}

pub(crate) struct FailingProfiler;

#[async_trait]
impl AttributeProfiler for FailingProfiler {
    async fn infer(&self, _answers: &QuizAnswers) -> Result<AttributeInference, ProfilerError> {
        Err(ProfilerError::Provider(LlmError::Connection(
            "connection refused".to_string(),
        )))
    }
}

pub(crate) struct FixedProfiler(pub AttributeInference);

impl FixedProfiler {
    pub(crate) fn offensive() -> Self {
        Self(AttributeInference {
            targets: AttributeTargets {
                power: 9,
                control: 6,
                comfort: 6,
                maneuverability: 7,
                rigidity: 8,
                sweetspot: 6,
            },
            analysis: "Jugadora ofensiva de derecha.".to_string(),
        })
    }
}

#[async_trait]
impl AttributeProfiler for FixedProfiler {
    async fn infer(&self, _answers: &QuizAnswers) -> Result<AttributeInference, ProfilerError> {
        Ok(self.0.clone())
    }
}

/// Provider that records prompts and replays a canned reply.
#[derive(Clone)]
pub(crate) struct ScriptedProvider {
    reply: Option<String>,
    prompts: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl ScriptedProvider {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Arc::default(),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            reply: None,
            prompts: Arc::default(),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<Vec<Message>> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(
        &self,
        messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(messages.to_vec());
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        })
    }
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    profiles: Mutex<HashMap<SessionId, PlayerProfile>>,
}

impl ProfileStore for MemoryStore {
    fn save(&self, session: &SessionId, profile: PlayerProfile) -> Result<(), StoreError> {
        self.profiles
            .lock()
            .expect("store mutex poisoned")
            .insert(session.clone(), profile);
        Ok(())
    }

    fn fetch(&self, session: &SessionId) -> Result<Option<PlayerProfile>, StoreError> {
        Ok(self
            .profiles
            .lock()
            .expect("store mutex poisoned")
            .get(session)
            .cloned())
    }

    fn clear(&self, session: &SessionId) -> Result<bool, StoreError> {
        Ok(self
            .profiles
            .lock()
            .expect("store mutex poisoned")
            .remove(session)
            .is_some())
    }
}
