use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Characteristic;

/// Opaque key under which a player's profile is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Medical flag captured by the questionnaire. `None` excludes every other tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Injury {
    None,
    Elbow,
    Shoulder,
    Wrist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Occasional,
    Weekly,
    SeveralPerWeek,
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtType {
    Indoor,
    Outdoor,
    Mixed,
}

/// Spending tier; the two lowest tiers veto expensive rackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    Economy,
    Performance,
    Premium,
    Unlimited,
}

/// Court side the player usually covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[serde(alias = "izquierda", alias = "reves", alias = "revés")]
    Left,
    #[serde(alias = "derecha", alias = "drive")]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayStyle {
    #[serde(alias = "ofensivo")]
    Offensive,
    #[serde(alias = "equilibrado")]
    Balanced,
    #[serde(alias = "consistente", alias = "defensivo")]
    Consistent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmashFrequency {
    Rarely,
    Sometimes,
    Often,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetStyle {
    Aggressive,
    Blocking,
    Placement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineStyle {
    Defensive,
    Counterattack,
    Attacking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePace {
    Slow,
    Moderate,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPreference {
    Soft,
    Medium,
    Hard,
}

/// Raw questionnaire answers, before AI inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAnswers {
    pub age: u8,
    pub gender: Gender,
    #[serde(default)]
    pub height: Option<u16>,
    #[serde(default)]
    pub weight: Option<f32>,
    #[serde(default)]
    pub injuries: BTreeSet<Injury>,
    pub frequency: Frequency,
    pub experience: Experience,
    pub court_type: CourtType,
    pub budget: Budget,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub style: Option<PlayStyle>,
    #[serde(default)]
    pub smash_frequency: Option<SmashFrequency>,
    #[serde(default)]
    pub net_style: Option<NetStyle>,
    #[serde(default)]
    pub baseline_style: Option<BaselineStyle>,
    #[serde(default)]
    pub game_pace: Option<GamePace>,
    #[serde(default)]
    pub touch_preference: Option<TouchPreference>,
    #[serde(default)]
    pub weight_preference: Option<u16>,
}

impl QuizAnswers {
    /// True when at least one arm injury is declared.
    pub fn has_arm_injury(&self) -> bool {
        self.injuries.iter().any(|injury| *injury != Injury::None)
    }
}

/// Desired 1-10 value per characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTargets {
    pub power: u8,
    pub control: u8,
    pub comfort: u8,
    pub maneuverability: u8,
    pub rigidity: u8,
    pub sweetspot: u8,
}

impl AttributeTargets {
    /// Neutral vector substituted when inference is unavailable.
    pub const FALLBACK: AttributeTargets = AttributeTargets {
        power: 5,
        control: 5,
        comfort: 5,
        maneuverability: 5,
        rigidity: 5,
        sweetspot: 7,
    };

    pub fn get(&self, characteristic: Characteristic) -> u8 {
        match characteristic {
            Characteristic::Power => self.power,
            Characteristic::Control => self.control,
            Characteristic::Comfort => self.comfort,
            Characteristic::Maneuverability => self.maneuverability,
            Characteristic::Sweetspot => self.sweetspot,
            Characteristic::Rigidity => self.rigidity,
        }
    }
}

impl Default for AttributeTargets {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Finalized player profile: questionnaire answers plus inferred targets.
///
/// Reads either a nested `targets` object or the six targets as top-level
/// fields; the nested object wins when both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProfileRecord")]
pub struct PlayerProfile {
    #[serde(flatten)]
    pub answers: QuizAnswers,
    pub targets: AttributeTargets,
    pub ai_analysis: Option<String>,
    pub finalized_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct ProfileRecord {
    #[serde(flatten)]
    answers: QuizAnswers,
    #[serde(default)]
    targets: Option<AttributeTargets>,
    #[serde(default)]
    power: Option<u8>,
    #[serde(default)]
    control: Option<u8>,
    #[serde(default)]
    comfort: Option<u8>,
    #[serde(default)]
    maneuverability: Option<u8>,
    #[serde(default)]
    rigidity: Option<u8>,
    #[serde(default)]
    sweetspot: Option<u8>,
    #[serde(default, alias = "aiAnalysis")]
    ai_analysis: Option<String>,
    #[serde(default, alias = "finalizedAt")]
    finalized_at: Option<DateTime<Utc>>,
}

impl From<ProfileRecord> for PlayerProfile {
    fn from(record: ProfileRecord) -> Self {
        let fallback = AttributeTargets::FALLBACK;
        let targets = record.targets.unwrap_or(AttributeTargets {
            power: record.power.unwrap_or(fallback.power),
            control: record.control.unwrap_or(fallback.control),
            comfort: record.comfort.unwrap_or(fallback.comfort),
            maneuverability: record.maneuverability.unwrap_or(fallback.maneuverability),
            rigidity: record.rigidity.unwrap_or(fallback.rigidity),
            sweetspot: record.sweetspot.unwrap_or(fallback.sweetspot),
        });

        Self {
            answers: record.answers,
            targets,
            ai_analysis: record.ai_analysis,
            finalized_at: record.finalized_at,
        }
    }
}

impl PlayerProfile {
    pub fn new(answers: QuizAnswers, targets: AttributeTargets, ai_analysis: String) -> Self {
        Self {
            answers,
            targets,
            ai_analysis: Some(ai_analysis),
            finalized_at: Some(Utc::now()),
        }
    }

    /// Style is the marker of a completed questionnaire.
    pub fn is_initialized(&self) -> bool {
        self.answers.style.is_some()
    }

    /// True when the analysis came from a real inference rather than the
    /// fallback path.
    pub fn has_genuine_analysis(&self) -> bool {
        match self.ai_analysis.as_deref() {
            Some(text) => !text.trim().is_empty() && !super::profiler::is_fallback_analysis(text),
            None => false,
        }
    }
}
