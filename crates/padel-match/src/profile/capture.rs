use super::domain::{Injury, QuizAnswers};

/// Validation errors raised while accepting questionnaire answers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("age must be at least {min}, found {found}")]
    AgeTooLow { min: u8, found: u8 },
    #[error("injury 'none' cannot be combined with other injuries")]
    ConflictingInjuries,
    #[error("{field} must be positive when provided")]
    NonPositive { field: &'static str },
}

pub const MINIMUM_AGE: u8 = 5;

/// Gate between the questionnaire and the profiling pipeline.
///
/// Normalizes the injury set (an empty set becomes `{None}`) and rejects
/// answers the scoring rules cannot interpret.
pub fn validate_answers(mut answers: QuizAnswers) -> Result<QuizAnswers, ProfileValidationError> {
    if answers.age < MINIMUM_AGE {
        return Err(ProfileValidationError::AgeTooLow {
            min: MINIMUM_AGE,
            found: answers.age,
        });
    }

    if answers.injuries.contains(&Injury::None) && answers.injuries.len() > 1 {
        return Err(ProfileValidationError::ConflictingInjuries);
    }
    if answers.injuries.is_empty() {
        answers.injuries.insert(Injury::None);
    }

    if answers.height == Some(0) {
        return Err(ProfileValidationError::NonPositive { field: "height" });
    }
    if answers
        .weight
        .map(|weight| !weight.is_finite() || weight <= 0.0)
        .unwrap_or(false)
    {
        return Err(ProfileValidationError::NonPositive { field: "weight" });
    }
    if answers.weight_preference == Some(0) {
        return Err(ProfileValidationError::NonPositive {
            field: "weight_preference",
        });
    }

    Ok(answers)
}
