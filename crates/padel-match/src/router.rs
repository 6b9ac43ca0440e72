use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::catalog::{Racket, RacketCatalog, RacketId, Shape};
use crate::error::AppError;
use crate::identify::{decode_image, GearIdentifier};
use crate::profile::{PlayerProfile, ProfileService, ProfileStore, QuizAnswers, SessionId};
use crate::scoring::{MatchEngine, RacketFilter};

pub const DEFAULT_MATCH_LIMIT: usize = 10;
pub const MAX_MATCH_LIMIT: usize = 50;
/// Body ceiling for `POST /api/v1/identify`. Base64 inflates a photo by a
/// third, so this admits camera images of roughly 12 MiB.
pub const MAX_IDENTIFY_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Everything the HTTP handlers need.
pub struct MatchApi<S> {
    profiles: ProfileService<S>,
    catalog: Arc<RacketCatalog>,
    engine: MatchEngine,
    identifier: Option<GearIdentifier>,
}

impl<S> MatchApi<S>
where
    S: ProfileStore + 'static,
{
    pub fn new(profiles: ProfileService<S>, catalog: Arc<RacketCatalog>, engine: MatchEngine) -> Self {
        Self {
            profiles,
            catalog,
            engine,
            identifier: None,
        }
    }

    pub fn with_identifier(mut self, identifier: GearIdentifier) -> Self {
        self.identifier = Some(identifier);
        self
    }

    fn require_profile(&self, session: &SessionId) -> Result<PlayerProfile, AppError> {
        self.profiles
            .get(session)?
            .ok_or_else(|| AppError::NotFound(format!("profile for session '{session}'")))
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MatchQuery {
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    shape: Option<Shape>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RacketQuery {
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    shape: Option<Shape>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdentifyRequest {
    mime_type: String,
    image_base64: String,
}

/// Router exposing the profile pipeline, rankings, and gear identification.
pub fn match_router<S>(api: Arc<MatchApi<S>>) -> Router
where
    S: ProfileStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/sessions/:session_id/profile",
            put(submit_profile::<S>)
                .get(get_profile::<S>)
                .delete(clear_profile::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/matches",
            get(list_matches::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/matches/:racket_id",
            get(match_breakdown::<S>),
        )
        .route("/api/v1/rackets", get(list_rackets::<S>))
        .route(
            "/api/v1/identify",
            post(identify_racket::<S>).layer(DefaultBodyLimit::max(MAX_IDENTIFY_BODY_BYTES)),
        )
        .with_state(api)
}

pub(crate) async fn submit_profile<S>(
    State(api): State<Arc<MatchApi<S>>>,
    Path(session_id): Path<String>,
    Json(answers): Json<QuizAnswers>,
) -> Result<Json<PlayerProfile>, AppError>
where
    S: ProfileStore + 'static,
{
    let session = SessionId(session_id);
    let profile = api.profiles.submit(&session, answers).await?;
    Ok(Json(profile))
}

pub(crate) async fn get_profile<S>(
    State(api): State<Arc<MatchApi<S>>>,
    Path(session_id): Path<String>,
) -> Result<Json<PlayerProfile>, AppError>
where
    S: ProfileStore + 'static,
{
    let profile = api.require_profile(&SessionId(session_id))?;
    Ok(Json(profile))
}

pub(crate) async fn clear_profile<S>(
    State(api): State<Arc<MatchApi<S>>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError>
where
    S: ProfileStore + 'static,
{
    let session = SessionId(session_id);
    if api.profiles.clear(&session)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("profile for session '{session}'")))
    }
}

pub(crate) async fn list_matches<S>(
    State(api): State<Arc<MatchApi<S>>>,
    Path(session_id): Path<String>,
    Query(query): Query<MatchQuery>,
) -> Result<Response, AppError>
where
    S: ProfileStore + 'static,
{
    let session = SessionId(session_id);
    let profile = api.require_profile(&session)?;
    let filter = RacketFilter {
        brand: query.brand,
        shape: query.shape,
        max_price: None,
    };
    let limit = query
        .limit
        .unwrap_or(DEFAULT_MATCH_LIMIT)
        .min(MAX_MATCH_LIMIT);

    let results = api
        .engine
        .best_matches(&profile, &api.catalog, &filter, limit);
    let payload = json!({
        "session_id": session,
        "genuine_analysis": profile.has_genuine_analysis(),
        "results": results,
    });

    Ok((StatusCode::OK, Json(payload)).into_response())
}

pub(crate) async fn match_breakdown<S>(
    State(api): State<Arc<MatchApi<S>>>,
    Path((session_id, racket_id)): Path<(String, String)>,
) -> Result<Response, AppError>
where
    S: ProfileStore + 'static,
{
    let racket_id = RacketId(racket_id);
    let racket = api
        .catalog
        .get(&racket_id)
        .ok_or_else(|| AppError::NotFound(format!("racket '{racket_id}'")))?;
    let profile = api.require_profile(&SessionId(session_id))?;

    let outcome = api.engine.evaluate(&profile, racket);
    let payload = json!({
        "racket": racket,
        "outcome": outcome,
    });

    Ok((StatusCode::OK, Json(payload)).into_response())
}

pub(crate) async fn list_rackets<S>(
    State(api): State<Arc<MatchApi<S>>>,
    Query(query): Query<RacketQuery>,
) -> Response
where
    S: ProfileStore + 'static,
{
    let filter = RacketFilter {
        brand: query.brand,
        shape: query.shape,
        max_price: None,
    };

    let mut rackets: Vec<&Racket> = api
        .catalog
        .rackets()
        .iter()
        .filter(|racket| filter.matches(racket))
        .collect();
    rackets.sort_by(|a, b| {
        a.brand
            .cmp(&b.brand)
            .then_with(|| a.model.cmp(&b.model))
            .then_with(|| a.id.cmp(&b.id))
    });

    (StatusCode::OK, Json(rackets)).into_response()
}

pub(crate) async fn identify_racket<S>(
    State(api): State<Arc<MatchApi<S>>>,
    Json(request): Json<IdentifyRequest>,
) -> Result<Response, AppError>
where
    S: ProfileStore + 'static,
{
    let identifier = api
        .identifier
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("gear identification".to_string()))?;
    let image = decode_image(&request.mime_type, &request.image_base64)?;

    let found = identifier.identify(&image, &api.catalog).await?;
    Ok((StatusCode::OK, Json(found)).into_response())
}
