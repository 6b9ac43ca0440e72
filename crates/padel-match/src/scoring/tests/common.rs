use std::collections::BTreeSet;

use crate::catalog::{Balance, Characteristics, Racket, RacketId, Shape};
use crate::profile::{
    AttributeTargets, Budget, CourtType, Experience, Frequency, Gender, Injury, PlayStyle,
    PlayerProfile, QuizAnswers, TouchPreference, FALLBACK_ANALYSIS,
};
use crate::scoring::MatchEngine;

pub(super) fn engine() -> MatchEngine {
    MatchEngine::default()
}

/// Offensive, hard-touch player with fallback targets and an unlimited budget.
pub(super) fn profile() -> PlayerProfile {
    PlayerProfile {
        answers: QuizAnswers {
            age: 29,
            gender: Gender::Male,
            height: None,
            weight: None,
            injuries: BTreeSet::from([Injury::None]),
            frequency: Frequency::Weekly,
            experience: Experience::Advanced,
            court_type: CourtType::Indoor,
            budget: Budget::Unlimited,
            position: None,
            style: Some(PlayStyle::Offensive),
            smash_frequency: None,
            net_style: None,
            baseline_style: None,
            game_pace: None,
            touch_preference: Some(TouchPreference::Hard),
            weight_preference: None,
        },
        targets: AttributeTargets {
            power: 9,
            control: 5,
            comfort: 5,
            maneuverability: 5,
            rigidity: 5,
            sweetspot: 5,
        },
        ai_analysis: Some(FALLBACK_ANALYSIS.to_string()),
        finalized_at: None,
    }
}

/// Head-heavy power racket priced at 300-350€.
pub(super) fn racket() -> Racket {
    Racket {
        id: RacketId("test-power-2024".to_string()),
        brand: "Test".to_string(),
        model: "Power".to_string(),
        year: 2024,
        shape: Shape::Teardrop,
        balance: Balance::High,
        weight_min: 360,
        weight_max: 370,
        core_type: "Eva".to_string(),
        surface_type: "Carbon".to_string(),
        roughness: true,
        characteristics: Characteristics {
            power: Some(10),
            control: Some(7),
            comfort: Some(7),
            maneuverability: Some(8),
            sweetspot: Some(7),
            rigidity: Some(9),
        },
        price_range: "300-350€".to_string(),
        prices: Vec::new(),
        review_summary: None,
        technologies: Vec::new(),
        target_player: None,
        game_style: None,
        is_trending: false,
    }
}

pub(super) fn racket_with(id: &str, model: &str, configure: impl FnOnce(&mut Racket)) -> Racket {
    let mut racket = racket();
    racket.id = RacketId(id.to_string());
    racket.model = model.to_string();
    configure(&mut racket);
    racket
}
