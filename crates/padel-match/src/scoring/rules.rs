use super::config::ScoringConfig;
use super::{PenaltyComponent, PenaltyRule};
use crate::catalog::{Balance, Characteristic, Racket, Shape};
use crate::profile::{Budget, NetStyle, PlayStyle, PlayerProfile, Position, TouchPreference};

/// Accumulates penalties for one (profile, racket) pair.
struct PenaltySheet<'a> {
    config: &'a ScoringConfig,
    racket: &'a Racket,
    components: Vec<PenaltyComponent>,
}

impl<'a> PenaltySheet<'a> {
    fn characteristic(&self, characteristic: Characteristic) -> u8 {
        self.racket
            .characteristics
            .value_or(characteristic, self.config.default_characteristic)
    }

    fn add(&mut self, rule: PenaltyRule, penalty: f64, notes: String) {
        if penalty > 0.0 {
            self.components.push(PenaltyComponent {
                rule,
                penalty,
                notes,
            });
        }
    }
}

pub(crate) fn score_penalties(
    profile: &PlayerProfile,
    racket: &Racket,
    config: &ScoringConfig,
) -> Vec<PenaltyComponent> {
    let mut sheet = PenaltySheet {
        config,
        racket,
        components: Vec::new(),
    };

    attribute_distance(&mut sheet, profile);
    touch_preference(&mut sheet, profile);
    weight_preference(&mut sheet, profile);
    biometrics(&mut sheet, profile);
    tactics(&mut sheet, profile);
    medical(&mut sheet, profile);
    budget(&mut sheet, profile);

    sheet.components
}

fn attribute_distance(sheet: &mut PenaltySheet<'_>, profile: &PlayerProfile) {
    let core_weight = if profile.has_genuine_analysis() {
        sheet.config.ai_core_weight
    } else {
        sheet.config.default_core_weight
    };

    let weighted = [
        (Characteristic::Power, core_weight),
        (Characteristic::Control, core_weight),
        (Characteristic::Maneuverability, sheet.config.secondary_weight),
        (Characteristic::Sweetspot, sheet.config.secondary_weight),
        (Characteristic::Comfort, sheet.config.secondary_weight),
    ];

    for (characteristic, weight) in weighted {
        let actual = sheet.characteristic(characteristic);
        let target = profile.targets.get(characteristic);
        let gap = actual.abs_diff(target);
        sheet.add(
            PenaltyRule::AttributeDistance(characteristic),
            weight * f64::from(gap),
            format!(
                "{} {actual} vs target {target} (weight {weight})",
                characteristic.label()
            ),
        );
    }
}

fn touch_preference(sheet: &mut PenaltySheet<'_>, profile: &PlayerProfile) {
    let Some(touch) = profile.answers.touch_preference else {
        return;
    };

    let target = match touch {
        TouchPreference::Soft => sheet.config.soft_touch_rigidity,
        TouchPreference::Medium => sheet.config.medium_touch_rigidity,
        TouchPreference::Hard => sheet.config.hard_touch_rigidity,
    };
    let rigidity = sheet.characteristic(Characteristic::Rigidity);
    sheet.add(
        PenaltyRule::TouchRigidity,
        sheet.config.touch_weight * f64::from(rigidity.abs_diff(target)),
        format!("rigidity {rigidity} vs preferred {target}"),
    );

    let comfort = sheet.characteristic(Characteristic::Comfort);
    if touch == TouchPreference::Soft && comfort < sheet.config.soft_touch_min_comfort {
        sheet.add(
            PenaltyRule::SoftTouchLowComfort,
            sheet.config.soft_touch_comfort_penalty,
            format!("soft touch with comfort {comfort}"),
        );
    }
}

fn weight_preference(sheet: &mut PenaltySheet<'_>, profile: &PlayerProfile) {
    let Some(preferred) = profile.answers.weight_preference else {
        return;
    };

    let preferred = f64::from(preferred);
    let average = sheet.racket.average_weight();
    sheet.add(
        PenaltyRule::WeightPreference,
        sheet.config.weight_preference_factor * (average - preferred).abs(),
        format!("average weight {average}g vs preferred {preferred}g"),
    );

    if preferred <= sheet.config.light_preference_max && average > sheet.config.heavy_racket_average
    {
        sheet.add(
            PenaltyRule::LightPreferenceMismatch,
            sheet.config.light_preference_mismatch_penalty,
            format!("wants a light racket, average is {average}g"),
        );
    }
}

fn biometrics(sheet: &mut PenaltySheet<'_>, profile: &PlayerProfile) {
    let Some(weight) = profile.answers.weight else {
        return;
    };

    if weight > sheet.config.heavy_player_kg
        && sheet.racket.weight_max < sheet.config.light_racket_max_weight
    {
        sheet.add(
            PenaltyRule::HeavyPlayerLightRacket,
            sheet.config.heavy_player_penalty,
            format!("{weight}kg player, racket tops out at {}g", sheet.racket.weight_max),
        );
    }

    if weight < sheet.config.light_player_kg
        && sheet.racket.weight_min > sheet.config.heavy_racket_min_weight
    {
        sheet.add(
            PenaltyRule::LightPlayerHeavyRacket,
            sheet.config.light_player_penalty,
            format!("{weight}kg player, racket starts at {}g", sheet.racket.weight_min),
        );
    }
}

fn tactics(sheet: &mut PenaltySheet<'_>, profile: &PlayerProfile) {
    let answers = &profile.answers;
    let racket = sheet.racket;

    if answers.position == Some(Position::Left) && racket.shape == Shape::Round {
        sheet.add(
            PenaltyRule::LeftSideRoundShape,
            sheet.config.left_round_penalty,
            "left side with a round head".to_string(),
        );
    }

    if answers.position == Some(Position::Right)
        && racket.shape == Shape::Diamond
        && racket.balance == Balance::High
    {
        sheet.add(
            PenaltyRule::RightSideHeadHeavyDiamond,
            sheet.config.right_diamond_head_heavy_penalty,
            "right side with a head-heavy diamond".to_string(),
        );
    }

    if answers.style == Some(PlayStyle::Offensive) && racket.balance == Balance::Low {
        sheet.add(
            PenaltyRule::OffensiveLowBalance,
            sheet.config.offensive_low_balance_penalty,
            "offensive style with low balance".to_string(),
        );
    }

    if answers.style == Some(PlayStyle::Consistent) && racket.balance == Balance::High {
        sheet.add(
            PenaltyRule::ConsistentHighBalance,
            sheet.config.consistent_high_balance_penalty,
            "consistent style with high balance".to_string(),
        );
    }

    let power = sheet.characteristic(Characteristic::Power);
    if answers.net_style == Some(NetStyle::Aggressive) && power < sheet.config.aggressive_net_min_power
    {
        sheet.add(
            PenaltyRule::AggressiveNetLowPower,
            sheet.config.aggressive_net_penalty,
            format!("aggressive at the net with power {power}"),
        );
    }

    let sweetspot = sheet.characteristic(Characteristic::Sweetspot);
    if answers.net_style == Some(NetStyle::Blocking)
        && sweetspot < sheet.config.blocking_net_min_sweetspot
    {
        sheet.add(
            PenaltyRule::BlockingNetSmallSweetspot,
            sheet.config.blocking_net_penalty,
            format!("blocking at the net with sweetspot {sweetspot}"),
        );
    }
}

fn medical(sheet: &mut PenaltySheet<'_>, profile: &PlayerProfile) {
    if !profile.answers.has_arm_injury() {
        return;
    }

    let comfort = sheet.characteristic(Characteristic::Comfort);
    sheet.add(
        PenaltyRule::InjuryComfort,
        sheet.config.injury_comfort_factor * f64::from(10u8.saturating_sub(comfort)),
        format!("arm injury with comfort {comfort}"),
    );

    let rigidity = sheet.characteristic(Characteristic::Rigidity);
    if rigidity > sheet.config.injury_max_rigidity {
        sheet.add(
            PenaltyRule::InjuryRigidity,
            sheet.config.injury_rigidity_penalty,
            format!("arm injury with rigidity {rigidity}"),
        );
    }

    if sheet.racket.balance == Balance::High {
        sheet.add(
            PenaltyRule::InjuryHighBalance,
            sheet.config.injury_high_balance_penalty,
            "arm injury with high balance".to_string(),
        );
    }

    if sheet.racket.weight_min > sheet.config.injury_heavy_min_weight {
        sheet.add(
            PenaltyRule::InjuryHeavyRacket,
            sheet.config.injury_heavy_penalty,
            format!("arm injury with minimum weight {}g", sheet.racket.weight_min),
        );
    }
}

fn budget(sheet: &mut PenaltySheet<'_>, profile: &PlayerProfile) {
    let midpoint = sheet.racket.price_midpoint();

    match profile.answers.budget {
        Budget::Economy if midpoint > sheet.config.economy_price_ceiling => sheet.add(
            PenaltyRule::EconomyBudgetVeto,
            sheet.config.economy_veto_penalty,
            format!(
                "price midpoint {midpoint}€ above economy ceiling {}€",
                sheet.config.economy_price_ceiling
            ),
        ),
        Budget::Performance if midpoint > sheet.config.performance_price_ceiling => sheet.add(
            PenaltyRule::PerformanceBudgetVeto,
            sheet.config.performance_veto_penalty,
            format!(
                "price midpoint {midpoint}€ above performance ceiling {}€",
                sheet.config.performance_price_ceiling
            ),
        ),
        _ => {}
    }
}
