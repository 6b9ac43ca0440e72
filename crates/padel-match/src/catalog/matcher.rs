use super::domain::Racket;
use super::RacketCatalog;
use serde::{Deserialize, Serialize};

/// Brand/model hint used to look rackets up in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GearQuery {
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<u16>,
}

/// Strategy mapping a loose brand/model hint to catalog candidates.
pub trait CandidateMatcher: Send + Sync {
    fn candidates<'a>(&self, query: &GearQuery, catalog: &'a RacketCatalog) -> Vec<&'a Racket>;
}

/// Best-effort heuristic: the racket brand contains the queried brand and the
/// racket model contains the first word of the queried model, both ignoring
/// case.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl CandidateMatcher for SubstringMatcher {
    fn candidates<'a>(&self, query: &GearQuery, catalog: &'a RacketCatalog) -> Vec<&'a Racket> {
        let brand = query.brand.trim().to_lowercase();
        let Some(first_word) = query.model.split_whitespace().next() else {
            return Vec::new();
        };
        let first_word = first_word.to_lowercase();
        if brand.is_empty() {
            return Vec::new();
        }

        catalog
            .rackets()
            .iter()
            .filter(|racket| racket.brand.to_lowercase().contains(&brand))
            .filter(|racket| racket.model.to_lowercase().contains(&first_word))
            .collect()
    }
}

/// Strict lookup: the slug of brand, model, and (when known) year must equal
/// the racket id or prefix it up to the year suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedIdMatcher;

impl CandidateMatcher for NormalizedIdMatcher {
    fn candidates<'a>(&self, query: &GearQuery, catalog: &'a RacketCatalog) -> Vec<&'a Racket> {
        let base = slugify(&format!("{} {}", query.brand, query.model));
        if base.is_empty() {
            return Vec::new();
        }

        let wanted = match query.year {
            Some(year) => format!("{base}-{year}"),
            None => base.clone(),
        };

        catalog
            .rackets()
            .iter()
            .filter(|racket| {
                let id = racket.id.as_str();
                if query.year.is_some() {
                    id == wanted
                } else {
                    id == base || strip_year_suffix(id) == base
                }
            })
            .collect()
    }
}

/// Lowercase ASCII slug with runs of other characters collapsed to `-`.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_dash = false;

    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    slug
}

fn strip_year_suffix(id: &str) -> &str {
    match id.rsplit_once('-') {
        Some((head, tail)) if tail.len() == 4 && tail.chars().all(|c| c.is_ascii_digit()) => head,
        _ => id,
    }
}
