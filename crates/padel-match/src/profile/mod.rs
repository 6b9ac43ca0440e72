//! Player profile pipeline: questionnaire capture, attribute inference, and
//! persistence.

mod capture;
pub mod domain;
pub mod profiler;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

pub use capture::{validate_answers, ProfileValidationError, MINIMUM_AGE};
pub use domain::{
    AttributeTargets, BaselineStyle, Budget, CourtType, Experience, Frequency, GamePace, Gender,
    Injury, NetStyle, PlayStyle, PlayerProfile, Position, QuizAnswers, SessionId,
    SmashFrequency, TouchPreference,
};
pub use profiler::{
    infer_or_fallback, is_fallback_analysis, parse_inference, AttributeInference,
    AttributeProfiler, DisabledProfiler, LlmAttributeProfiler, ProfilerError, FALLBACK_ANALYSIS,
    FALLBACK_MARKER,
};
pub use repository::{JsonFileProfileStore, ProfileStore, StoreError};
pub use service::{ProfileService, ProfileServiceError};
