//! Deterministic racket compatibility scoring.
//!
//! Every rule adds a non-negative penalty; the total is mapped onto a 0-100
//! score. The engine is a pure function of the profile and racket it is given.

mod config;
pub mod ranking;
mod rules;

#[cfg(test)]
mod tests;

pub use config::ScoringConfig;
pub use ranking::{RacketFilter, RankedRacket};

use crate::catalog::{Characteristic, Racket, RacketId};
use crate::profile::PlayerProfile;
use serde::{Deserialize, Serialize};

/// Stateless evaluator that applies the penalty table to a profile.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    config: ScoringConfig,
}

impl MatchEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Compatibility in `0..=100`. A profile without a play style has not
    /// completed the questionnaire and scores 0 against every racket.
    pub fn score(&self, profile: &PlayerProfile, racket: &Racket) -> u8 {
        self.evaluate(profile, racket).score
    }

    /// Score plus the penalty trail behind it.
    pub fn evaluate(&self, profile: &PlayerProfile, racket: &Racket) -> MatchOutcome {
        if !profile.is_initialized() {
            return MatchOutcome {
                racket_id: racket.id.clone(),
                score: 0,
                total_penalty: 0.0,
                components: Vec::new(),
            };
        }

        let components = rules::score_penalties(profile, racket, &self.config);
        let total_penalty: f64 = components.iter().map(|component| component.penalty).sum();

        MatchOutcome {
            racket_id: racket.id.clone(),
            score: self.penalty_to_score(total_penalty),
            total_penalty,
            components,
        }
    }

    fn penalty_to_score(&self, penalty: f64) -> u8 {
        let raw = 100.0 - penalty / self.config.penalty_divisor;
        if raw.is_nan() {
            return 0;
        }
        raw.round().clamp(0.0, 100.0) as u8
    }
}

/// Named source of a penalty, for audit trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "characteristic")]
pub enum PenaltyRule {
    AttributeDistance(Characteristic),
    TouchRigidity,
    SoftTouchLowComfort,
    WeightPreference,
    LightPreferenceMismatch,
    HeavyPlayerLightRacket,
    LightPlayerHeavyRacket,
    LeftSideRoundShape,
    RightSideHeadHeavyDiamond,
    OffensiveLowBalance,
    ConsistentHighBalance,
    AggressiveNetLowPower,
    BlockingNetSmallSweetspot,
    InjuryComfort,
    InjuryRigidity,
    InjuryHighBalance,
    InjuryHeavyRacket,
    EconomyBudgetVeto,
    PerformanceBudgetVeto,
}

/// Discrete contribution to a match penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyComponent {
    pub rule: PenaltyRule,
    pub penalty: f64,
    pub notes: String,
}

/// Evaluation output describing the score and the penalties behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub racket_id: RacketId,
    pub score: u8,
    pub total_penalty: f64,
    pub components: Vec<PenaltyComponent>,
}

impl MatchOutcome {
    pub fn penalty_for(&self, rule: PenaltyRule) -> f64 {
        self.components
            .iter()
            .filter(|component| component.rule == rule)
            .map(|component| component.penalty)
            .sum()
    }
}
