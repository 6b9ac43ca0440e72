//! Static racket reference data.
//!
//! The catalog is loaded wholesale before any scoring happens and is never
//! mutated afterwards; consumers share it behind an `Arc`.

mod domain;
pub mod matcher;
mod parser;
mod price;

pub use domain::{
    Balance, Characteristic, Characteristics, Price, Racket, RacketId, Shape, Technology,
};
pub use matcher::{CandidateMatcher, GearQuery, NormalizedIdMatcher, SubstringMatcher};
pub use price::price_midpoint;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::info;

const DEFAULT_CATALOG: &str = include_str!("../../data/rackets.json");

/// Failure while loading or validating catalog data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid catalog row {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
    #[error("duplicate racket id '{0}'")]
    DuplicateId(RacketId),
    #[error("racket '{id}' has weight_min {min} above weight_max {max}")]
    WeightRange { id: RacketId, min: u16, max: u16 },
    #[error("racket '{id}' rates {characteristic} as {value}, expected 1-10")]
    RatingOutOfRange {
        id: RacketId,
        characteristic: &'static str,
        value: u8,
    },
}

/// Immutable, validated collection of rackets.
#[derive(Debug, Clone, Default)]
pub struct RacketCatalog {
    rackets: Vec<Racket>,
}

impl RacketCatalog {
    pub fn new(rackets: Vec<Racket>) -> Result<Self, CatalogError> {
        validate(&rackets)?;
        Ok(Self { rackets })
    }

    /// The data set bundled with the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_reader(DEFAULT_CATALOG.as_bytes())
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let rackets: Vec<Racket> = serde_json::from_reader(reader)?;
        let catalog = Self::new(rackets)?;
        info!(rackets = catalog.len(), "racket catalog loaded");
        Ok(catalog)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let rackets = parser::parse_csv(reader)?;
        let catalog = Self::new(rackets)?;
        info!(rackets = catalog.len(), "racket catalog imported from csv");
        Ok(catalog)
    }

    /// Load from disk, picking the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            Self::from_csv_reader(file)
        } else {
            Self::from_json_reader(file)
        }
    }

    pub fn rackets(&self) -> &[Racket] {
        &self.rackets
    }

    pub fn len(&self) -> usize {
        self.rackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rackets.is_empty()
    }

    pub fn get(&self, id: &RacketId) -> Option<&Racket> {
        self.rackets.iter().find(|racket| &racket.id == id)
    }

    pub fn by_brand<'a>(&'a self, brand: &'a str) -> impl Iterator<Item = &'a Racket> + 'a {
        self.rackets
            .iter()
            .filter(move |racket| racket.brand.eq_ignore_ascii_case(brand.trim()))
    }

    /// Distinct brand names in catalog order.
    pub fn brands(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rackets
            .iter()
            .filter(|racket| seen.insert(racket.brand.to_lowercase()))
            .map(|racket| racket.brand.as_str())
            .collect()
    }
}

fn validate(rackets: &[Racket]) -> Result<(), CatalogError> {
    let mut ids = HashSet::new();
    for racket in rackets {
        if !ids.insert(&racket.id) {
            return Err(CatalogError::DuplicateId(racket.id.clone()));
        }

        if racket.weight_min > racket.weight_max {
            return Err(CatalogError::WeightRange {
                id: racket.id.clone(),
                min: racket.weight_min,
                max: racket.weight_max,
            });
        }

        for characteristic in Characteristic::ALL {
            if let Some(value) = racket.characteristics.get(characteristic) {
                if !(1..=10).contains(&value) {
                    return Err(CatalogError::RatingOutOfRange {
                        id: racket.id.clone(),
                        characteristic: characteristic.label(),
                        value,
                    });
                }
            }
        }
    }

    Ok(())
}
