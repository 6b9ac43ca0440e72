//! Attribute-target inference.
//!
//! An [`AttributeProfiler`] turns questionnaire answers into six 1-10 targets
//! plus a short rationale. [`infer_or_fallback`] is the only entry point the
//! pipeline uses: every failure collapses into the neutral fallback vector and
//! an analysis carrying [`FALLBACK_MARKER`], which the scoring engine reads as
//! a low-confidence signal.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::domain::{AttributeTargets, QuizAnswers};
use crate::llm::{extract_json_object, CompletionOptions, LlmError, LlmProvider, Message};

/// Sentinel embedded in every fallback analysis.
pub const FALLBACK_MARKER: &str = "[ai-fallback]";

/// Analysis stored when inference failed.
pub const FALLBACK_ANALYSIS: &str =
    "[ai-fallback] AI profiling was unavailable; neutral attribute targets were applied.";

pub fn is_fallback_analysis(text: &str) -> bool {
    text.contains(FALLBACK_MARKER)
}

/// Targets and rationale returned by a profiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInference {
    pub targets: AttributeTargets,
    pub analysis: String,
}

impl AttributeInference {
    pub fn fallback() -> Self {
        Self {
            targets: AttributeTargets::FALLBACK,
            analysis: FALLBACK_ANALYSIS.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        is_fallback_analysis(&self.analysis)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfilerError {
    #[error(transparent)]
    Provider(#[from] LlmError),
    #[error("malformed profiler reply: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait AttributeProfiler: Send + Sync {
    async fn infer(&self, answers: &QuizAnswers) -> Result<AttributeInference, ProfilerError>;
}

/// Run the profiler once; any error yields [`AttributeInference::fallback`].
pub async fn infer_or_fallback<P>(profiler: &P, answers: &QuizAnswers) -> AttributeInference
where
    P: AttributeProfiler + ?Sized,
{
    match profiler.infer(answers).await {
        Ok(inference) => inference,
        Err(err) => {
            warn!(error = %err, "attribute profiling failed, applying fallback targets");
            AttributeInference::fallback()
        }
    }
}

/// Parse a model reply into targets. Numbers may be integers or floats and
/// are rounded and clamped into 1-10.
pub fn parse_inference(raw: &str) -> Result<AttributeInference, ProfilerError> {
    let object = extract_json_object(raw)
        .ok_or_else(|| ProfilerError::Malformed("no JSON object in reply".to_string()))?;
    let value: Value =
        serde_json::from_str(object).map_err(|err| ProfilerError::Malformed(err.to_string()))?;

    let targets = AttributeTargets {
        power: rating(&value, "power")?,
        control: rating(&value, "control")?,
        comfort: rating(&value, "comfort")?,
        maneuverability: rating(&value, "maneuverability")?,
        rigidity: rating(&value, "rigidity")?,
        sweetspot: rating(&value, "sweetspot")?,
    };

    let analysis = value
        .get("aiAnalysis")
        .or_else(|| value.get("ai_analysis"))
        .or_else(|| value.get("analysis"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ProfilerError::Malformed("missing analysis text".to_string()))?;

    Ok(AttributeInference {
        targets,
        analysis: analysis.to_string(),
    })
}

fn rating(value: &Value, field: &str) -> Result<u8, ProfilerError> {
    let number = match value.get(field) {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
    .ok_or_else(|| ProfilerError::Malformed(format!("field '{field}' is not a number")))?;

    Ok(number.round().clamp(1.0, 10.0) as u8)
}

/// Stand-in used when no model backend is configured. Every profile it
/// touches ends up with the fallback targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledProfiler;

#[async_trait]
impl AttributeProfiler for DisabledProfiler {
    async fn infer(&self, _answers: &QuizAnswers) -> Result<AttributeInference, ProfilerError> {
        Err(ProfilerError::Provider(LlmError::NotConfigured(
            "no AI endpoint or API key".to_string(),
        )))
    }
}

/// Profiler backed by a chat-completion model.
pub struct LlmAttributeProfiler<P> {
    provider: P,
    options: CompletionOptions,
    language: String,
}

impl<P: LlmProvider> LlmAttributeProfiler<P> {
    pub fn new(provider: P, options: CompletionOptions, language: impl Into<String>) -> Self {
        Self {
            provider,
            options,
            language: language.into(),
        }
    }

    fn instructions(&self) -> String {
        format!(
            "You are a padel equipment expert. Only discuss padel. \
             Given a player's questionnaire, infer ideal racket attribute targets on a 1-10 scale. \
             Reply with strict JSON and nothing else, no prose and no code fences, shaped as \
             {{\"power\":n,\"control\":n,\"comfort\":n,\"maneuverability\":n,\"rigidity\":n,\"sweetspot\":n,\"aiAnalysis\":\"...\"}}. \
             Write aiAnalysis in language '{}' as two or three sentences addressed to the player.",
            self.language
        )
    }
}

#[async_trait]
impl<P: LlmProvider> AttributeProfiler for LlmAttributeProfiler<P> {
    async fn infer(&self, answers: &QuizAnswers) -> Result<AttributeInference, ProfilerError> {
        let questionnaire = serde_json::to_string(answers)
            .map_err(|err| ProfilerError::Malformed(format!("unserializable answers: {err}")))?;
        let messages = [
            Message::system(self.instructions()),
            Message::user(format!("Questionnaire: {questionnaire}")),
        ];

        let reply = self.provider.complete(&messages, &self.options).await?;
        debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            "profiler reply received"
        );
        parse_inference(&reply)
    }
}
