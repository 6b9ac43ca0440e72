use serde::{Deserialize, Serialize};

use super::price::price_midpoint;

/// Stable identifier for a racket variant (brand, model, and year).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RacketId(pub String);

impl RacketId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RacketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Head shape of the racket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[serde(alias = "redonda", alias = "Redonda")]
    Round,
    #[serde(alias = "lagrima", alias = "lágrima", alias = "Lágrima")]
    Teardrop,
    #[serde(alias = "diamante", alias = "Diamante")]
    Diamond,
    #[serde(alias = "hibrida", alias = "híbrida", alias = "Híbrida")]
    Hybrid,
}

impl Shape {
    pub fn label(&self) -> &'static str {
        match self {
            Shape::Round => "round",
            Shape::Teardrop => "teardrop",
            Shape::Diamond => "diamond",
            Shape::Hybrid => "hybrid",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "round" | "redonda" => Some(Shape::Round),
            "teardrop" | "lagrima" | "lágrima" => Some(Shape::Teardrop),
            "diamond" | "diamante" => Some(Shape::Diamond),
            "hybrid" | "hibrida" | "híbrida" => Some(Shape::Hybrid),
            _ => None,
        }
    }
}

/// Weight distribution class: low favours control, high favours power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Balance {
    #[serde(alias = "baja", alias = "bajo")]
    Low,
    #[serde(alias = "media", alias = "medio")]
    Medium,
    #[serde(alias = "alta", alias = "alto")]
    High,
}

impl Balance {
    pub fn label(&self) -> &'static str {
        match self {
            Balance::Low => "low",
            Balance::Medium => "medium",
            Balance::High => "high",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" | "baja" | "bajo" => Some(Balance::Low),
            "medium" | "media" | "medio" => Some(Balance::Medium),
            "high" | "alta" | "alto" => Some(Balance::High),
            _ => None,
        }
    }
}

/// The six rated dimensions shared by rackets and player targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Characteristic {
    Power,
    Control,
    Comfort,
    Maneuverability,
    Sweetspot,
    Rigidity,
}

impl Characteristic {
    pub const ALL: [Characteristic; 6] = [
        Characteristic::Power,
        Characteristic::Control,
        Characteristic::Comfort,
        Characteristic::Maneuverability,
        Characteristic::Sweetspot,
        Characteristic::Rigidity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Characteristic::Power => "power",
            Characteristic::Control => "control",
            Characteristic::Comfort => "comfort",
            Characteristic::Maneuverability => "maneuverability",
            Characteristic::Sweetspot => "sweetspot",
            Characteristic::Rigidity => "rigidity",
        }
    }
}

/// Fixed 1-10 ratings of a racket. Producers may omit values; consumers
/// resolve gaps through [`Characteristics::value_or`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comfort: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maneuverability: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweetspot: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rigidity: Option<u8>,
}

impl Characteristics {
    pub fn get(&self, characteristic: Characteristic) -> Option<u8> {
        match characteristic {
            Characteristic::Power => self.power,
            Characteristic::Control => self.control,
            Characteristic::Comfort => self.comfort,
            Characteristic::Maneuverability => self.maneuverability,
            Characteristic::Sweetspot => self.sweetspot,
            Characteristic::Rigidity => self.rigidity,
        }
    }

    pub fn value_or(&self, characteristic: Characteristic, default: u8) -> u8 {
        self.get(characteristic).unwrap_or(default)
    }
}

/// Retail offer for a racket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub store: String,
    pub price: f64,
    pub url: String,
}

/// Named construction technology with a short explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub label: String,
    pub note: String,
}

/// Immutable catalog record for one racket variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Racket {
    pub id: RacketId,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub shape: Shape,
    pub balance: Balance,
    pub weight_min: u16,
    pub weight_max: u16,
    #[serde(default)]
    pub core_type: String,
    #[serde(default)]
    pub surface_type: String,
    #[serde(default)]
    pub roughness: bool,
    #[serde(default)]
    pub characteristics: Characteristics,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub prices: Vec<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_summary: Option<String>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_player: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_style: Option<String>,
    #[serde(default)]
    pub is_trending: bool,
}

impl Racket {
    pub fn average_weight(&self) -> f64 {
        (f64::from(self.weight_min) + f64::from(self.weight_max)) / 2.0
    }

    pub fn price_midpoint(&self) -> f64 {
        price_midpoint(&self.price_range)
    }

    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }
}
