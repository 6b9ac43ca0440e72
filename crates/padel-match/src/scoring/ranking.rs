use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::MatchEngine;
use crate::catalog::{Racket, RacketCatalog, Shape};
use crate::profile::PlayerProfile;

/// Optional narrowing applied before ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RacketFilter {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub shape: Option<Shape>,
    /// Upper bound on the price-range midpoint, in euros.
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl RacketFilter {
    pub fn matches(&self, racket: &Racket) -> bool {
        let brand_ok = self
            .brand
            .as_deref()
            .map(|brand| racket.brand.eq_ignore_ascii_case(brand.trim()))
            .unwrap_or(true);
        let shape_ok = self.shape.map(|shape| racket.shape == shape).unwrap_or(true);
        let price_ok = self
            .max_price
            .map(|max| racket.price_midpoint() <= max)
            .unwrap_or(true);

        brand_ok && shape_ok && price_ok
    }
}

/// A racket paired with its compatibility score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRacket<'a> {
    pub score: u8,
    pub racket: &'a Racket,
}

impl MatchEngine {
    /// Score every racket passing `filter`, best first. Ties fall back to the
    /// model name and then the id so the order is fully deterministic.
    pub fn rank<'a>(
        &self,
        profile: &PlayerProfile,
        catalog: &'a RacketCatalog,
        filter: &RacketFilter,
    ) -> Vec<RankedRacket<'a>> {
        let mut ranked: Vec<RankedRacket<'a>> = catalog
            .rackets()
            .iter()
            .filter(|racket| filter.matches(racket))
            .map(|racket| RankedRacket {
                score: self.score(profile, racket),
                racket,
            })
            .collect();

        ranked.sort_by(compare_ranked);
        ranked
    }

    /// Top `limit` rackets with a non-zero score.
    pub fn best_matches<'a>(
        &self,
        profile: &PlayerProfile,
        catalog: &'a RacketCatalog,
        filter: &RacketFilter,
        limit: usize,
    ) -> Vec<RankedRacket<'a>> {
        self.rank(profile, catalog, filter)
            .into_iter()
            .filter(|entry| entry.score > 0)
            .take(limit)
            .collect()
    }
}

fn compare_ranked(a: &RankedRacket<'_>, b: &RankedRacket<'_>) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.racket.model.cmp(&b.racket.model))
        .then_with(|| a.racket.id.cmp(&b.racket.id))
}
