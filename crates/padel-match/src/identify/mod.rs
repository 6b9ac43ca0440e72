//! Photo-based racket identification.
//!
//! A [`VisionProvider`] reads the photo, the reply is parsed into a
//! [`GearIdentification`], and a [`CandidateMatcher`] looks it up in the
//! catalog. Unlike profiling there is no silent fallback: every failure is
//! reported to the caller.

mod vision;

pub use vision::{LlmVisionProvider, VisionProvider};

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::catalog::{CandidateMatcher, GearQuery, Racket, RacketCatalog};
use crate::llm::{extract_json_object, ImageAttachment, LlmError};

#[derive(Debug, thiserror::Error)]
pub enum IdentifyError {
    #[error("unsupported media type '{0}', expected image/*")]
    UnsupportedMedia(String),
    #[error("image payload is empty")]
    EmptyImage,
    #[error("image payload is not valid base64: {0}")]
    InvalidEncoding(String),
    #[error(transparent)]
    Provider(#[from] LlmError),
    #[error("malformed identification reply: {0}")]
    Malformed(String),
}

/// What the vision model believes the photo shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearIdentification {
    pub brand: String,
    pub model: String,
    pub year: Option<u16>,
    pub analysis: String,
    /// 0-100.
    pub confidence: u8,
}

impl GearIdentification {
    pub fn query(&self) -> GearQuery {
        GearQuery {
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
        }
    }
}

/// Identification plus the catalog rackets it may refer to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GearMatch<'a> {
    pub identification: GearIdentification,
    pub candidates: Vec<&'a Racket>,
}

/// Build an attachment from a declared mime type and raw bytes.
pub fn image_attachment(mime_type: &str, bytes: Vec<u8>) -> Result<ImageAttachment, IdentifyError> {
    let parsed: mime::Mime = mime_type
        .trim()
        .parse()
        .map_err(|_| IdentifyError::UnsupportedMedia(mime_type.to_string()))?;
    if parsed.type_() != mime::IMAGE {
        return Err(IdentifyError::UnsupportedMedia(mime_type.to_string()));
    }
    if bytes.is_empty() {
        return Err(IdentifyError::EmptyImage);
    }

    Ok(ImageAttachment {
        mime_type: parsed,
        bytes,
    })
}

/// Same as [`image_attachment`] for a base64 payload.
pub fn decode_image(mime_type: &str, encoded: &str) -> Result<ImageAttachment, IdentifyError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|err| IdentifyError::InvalidEncoding(err.to_string()))?;
    image_attachment(mime_type, bytes)
}

pub fn parse_identification(raw: &str) -> Result<GearIdentification, IdentifyError> {
    let object = extract_json_object(raw)
        .ok_or_else(|| IdentifyError::Malformed("no JSON object in reply".to_string()))?;
    let value: Value =
        serde_json::from_str(object).map_err(|err| IdentifyError::Malformed(err.to_string()))?;

    let text = |field: &str| {
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    };

    let brand = text("brand");
    let model = text("model");
    if brand.is_empty() || model.is_empty() {
        return Err(IdentifyError::Malformed(
            "brand and model are required".to_string(),
        ));
    }

    let year = match value.get("year") {
        Some(Value::Number(number)) => number.as_u64().and_then(|year| u16::try_from(year).ok()),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    };
    let confidence = value
        .get("confidence")
        .and_then(Value::as_f64)
        .filter(|number| number.is_finite())
        .map(|number| number.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0);

    Ok(GearIdentification {
        brand,
        model,
        year,
        analysis: text("analysis"),
        confidence,
    })
}

/// Vision provider plus catalog lookup strategy.
pub struct GearIdentifier {
    vision: Arc<dyn VisionProvider>,
    matcher: Arc<dyn CandidateMatcher>,
}

impl GearIdentifier {
    pub fn new(vision: Arc<dyn VisionProvider>, matcher: Arc<dyn CandidateMatcher>) -> Self {
        Self { vision, matcher }
    }

    pub async fn identify<'a>(
        &self,
        image: &ImageAttachment,
        catalog: &'a RacketCatalog,
    ) -> Result<GearMatch<'a>, IdentifyError> {
        if image.mime_type.type_() != mime::IMAGE {
            return Err(IdentifyError::UnsupportedMedia(image.mime_type.to_string()));
        }
        if image.bytes.is_empty() {
            return Err(IdentifyError::EmptyImage);
        }

        let reply = self.vision.describe(image).await?;
        let identification = parse_identification(&reply)?;
        let candidates = self.matcher.candidates(&identification.query(), catalog);

        info!(
            brand = %identification.brand,
            model = %identification.model,
            confidence = identification.confidence,
            candidates = candidates.len(),
            "racket identified"
        );

        Ok(GearMatch {
            identification,
            candidates,
        })
    }
}
