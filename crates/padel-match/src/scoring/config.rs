use serde::{Deserialize, Serialize};

/// Penalty weights and thresholds used by the match rules.
///
/// The defaults are product-tuned values; the budget thresholds and the
/// penalty divisor in particular have no derivation beyond calibration
/// against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Value assumed for a characteristic the racket record omits.
    pub default_characteristic: u8,
    /// Power/control weight when targets come from a genuine AI analysis.
    pub ai_core_weight: f64,
    /// Power/control weight when targets are questionnaire defaults.
    pub default_core_weight: f64,
    /// Weight for maneuverability, sweetspot, and comfort distance.
    pub secondary_weight: f64,

    pub soft_touch_rigidity: u8,
    pub medium_touch_rigidity: u8,
    pub hard_touch_rigidity: u8,
    pub touch_weight: f64,
    /// Soft-touch players facing a racket below this comfort pay the surcharge.
    pub soft_touch_min_comfort: u8,
    pub soft_touch_comfort_penalty: f64,

    pub weight_preference_factor: f64,
    pub light_preference_max: f64,
    pub heavy_racket_average: f64,
    pub light_preference_mismatch_penalty: f64,

    pub heavy_player_kg: f32,
    pub light_racket_max_weight: u16,
    pub heavy_player_penalty: f64,
    pub light_player_kg: f32,
    pub heavy_racket_min_weight: u16,
    pub light_player_penalty: f64,

    pub left_round_penalty: f64,
    pub right_diamond_head_heavy_penalty: f64,
    pub offensive_low_balance_penalty: f64,
    pub consistent_high_balance_penalty: f64,
    pub aggressive_net_min_power: u8,
    pub aggressive_net_penalty: f64,
    pub blocking_net_min_sweetspot: u8,
    pub blocking_net_penalty: f64,

    pub injury_comfort_factor: f64,
    pub injury_max_rigidity: u8,
    pub injury_rigidity_penalty: f64,
    pub injury_high_balance_penalty: f64,
    pub injury_heavy_min_weight: u16,
    pub injury_heavy_penalty: f64,

    pub economy_price_ceiling: f64,
    pub economy_veto_penalty: f64,
    pub performance_price_ceiling: f64,
    pub performance_veto_penalty: f64,

    /// Penalty points per lost percentage point.
    pub penalty_divisor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_characteristic: 5,
            ai_core_weight: 12.0,
            default_core_weight: 6.0,
            secondary_weight: 5.0,

            soft_touch_rigidity: 3,
            medium_touch_rigidity: 6,
            hard_touch_rigidity: 9,
            touch_weight: 10.0,
            soft_touch_min_comfort: 7,
            soft_touch_comfort_penalty: 15.0,

            weight_preference_factor: 1.5,
            light_preference_max: 355.0,
            heavy_racket_average: 370.0,
            light_preference_mismatch_penalty: 25.0,

            heavy_player_kg: 90.0,
            light_racket_max_weight: 365,
            heavy_player_penalty: 15.0,
            light_player_kg: 65.0,
            heavy_racket_min_weight: 370,
            light_player_penalty: 20.0,

            left_round_penalty: 12.0,
            right_diamond_head_heavy_penalty: 15.0,
            offensive_low_balance_penalty: 15.0,
            consistent_high_balance_penalty: 15.0,
            aggressive_net_min_power: 7,
            aggressive_net_penalty: 10.0,
            blocking_net_min_sweetspot: 8,
            blocking_net_penalty: 10.0,

            injury_comfort_factor: 15.0,
            injury_max_rigidity: 7,
            injury_rigidity_penalty: 40.0,
            injury_high_balance_penalty: 30.0,
            injury_heavy_min_weight: 370,
            injury_heavy_penalty: 25.0,

            economy_price_ceiling: 165.0,
            economy_veto_penalty: 100.0,
            performance_price_ceiling: 270.0,
            performance_veto_penalty: 70.0,

            penalty_divisor: 2.5,
        }
    }
}
