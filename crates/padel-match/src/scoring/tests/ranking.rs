use std::collections::BTreeSet;

use super::common::*;
use crate::catalog::{Characteristics, RacketCatalog, Shape};
use crate::profile::Injury;
use crate::scoring::RacketFilter;

fn catalog() -> RacketCatalog {
    RacketCatalog::new(vec![
        racket_with("twin-b", "Beta", |_| {}),
        racket_with("twin-a", "Alpha", |_| {}),
        racket_with("twin-c", "Alpha", |_| {}),
        racket_with("round-control", "Control", |racket| {
            racket.brand = "Other".to_string();
            racket.shape = Shape::Round;
            racket.characteristics.power = Some(5);
            racket.price_range = "120-140€".to_string();
        }),
        racket_with("brick", "Brick", |racket| {
            racket.characteristics = Characteristics {
                power: Some(1),
                control: Some(1),
                comfort: Some(1),
                maneuverability: Some(1),
                sweetspot: Some(1),
                rigidity: Some(10),
            };
            racket.weight_min = 380;
            racket.weight_max = 390;
        }),
    ])
    .expect("valid catalog")
}

#[test]
fn rank_orders_by_score_then_model_then_id() {
    let engine = engine();
    let catalog = catalog();

    let ranked = engine.rank(&profile(), &catalog, &RacketFilter::default());
    let ids: Vec<&str> = ranked.iter().map(|entry| entry.racket.id.as_str()).collect();

    assert_eq!(ranked.len(), 5);
    assert_eq!(&ids[..3], &["twin-a", "twin-c", "twin-b"]);
    assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn best_matches_drops_zero_scores_and_respects_limit() {
    let engine = engine();
    let catalog = catalog();
    let mut profile = profile();
    profile.answers.injuries = BTreeSet::from([Injury::Wrist]);

    let brick = catalog
        .rackets()
        .iter()
        .find(|racket| racket.id.as_str() == "brick")
        .expect("brick present");
    assert_eq!(engine.score(&profile, brick), 0);

    let best = engine.best_matches(&profile, &catalog, &RacketFilter::default(), 10);
    assert!(best.iter().all(|entry| entry.score > 0));
    assert!(best.iter().all(|entry| entry.racket.id.as_str() != "brick"));

    let limited = engine.best_matches(&profile, &catalog, &RacketFilter::default(), 2);
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0], best[0]);
}

#[test]
fn best_matches_is_empty_for_uninitialized_profile() {
    let engine = engine();
    let catalog = catalog();
    let mut profile = profile();
    profile.answers.style = None;

    assert!(engine
        .best_matches(&profile, &catalog, &RacketFilter::default(), 10)
        .is_empty());
}

#[test]
fn filter_narrows_by_brand_shape_and_price() {
    let engine = engine();
    let catalog = catalog();

    let by_brand = RacketFilter {
        brand: Some("  other ".to_string()),
        ..RacketFilter::default()
    };
    let by_shape = RacketFilter {
        shape: Some(Shape::Round),
        ..RacketFilter::default()
    };
    let by_price = RacketFilter {
        max_price: Some(200.0),
        ..RacketFilter::default()
    };

    for filter in [by_brand, by_shape, by_price] {
        let ranked = engine.rank(&profile(), &catalog, &filter);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].racket.id.as_str(), "round-control");
    }
}
