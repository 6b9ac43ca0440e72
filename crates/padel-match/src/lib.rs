//! Padel racket recommendation core.
//!
//! The catalog holds immutable racket records, the profile pipeline turns
//! questionnaire answers into persisted player profiles, and the scoring
//! engine rates every (profile, racket) pair on a 0-100 scale.

pub mod catalog;
pub mod config;
pub mod error;
pub mod identify;
pub mod llm;
pub mod profile;
pub mod router;
pub mod scoring;
pub mod telemetry;
