use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use padel_match::catalog::{Characteristic, RacketCatalog, RacketId};
use padel_match::llm::{CompletionOptions, LlmError, LlmProvider, Message};
use padel_match::profile::{
    AttributeTargets, Budget, CourtType, Experience, Frequency, Gender, Injury,
    JsonFileProfileStore, LlmAttributeProfiler, PlayStyle, ProfileService, QuizAnswers,
    SessionId, StoreError, FALLBACK_MARKER,
};
use padel_match::scoring::{MatchEngine, PenaltyRule, RacketFilter};

#[derive(Clone)]
struct CannedModel {
    reply: Option<&'static str>,
    calls: Arc<AtomicUsize>,
}

impl CannedModel {
    fn replying(reply: &'static str) -> Self {
        Self {
            reply: Some(reply),
            calls: Arc::default(),
        }
    }

    fn unreachable() -> Self {
        Self {
            reply: None,
            calls: Arc::default(),
        }
    }
}

#[async_trait]
impl LlmProvider for CannedModel {
    fn name(&self) -> &str {
        "canned"
    }

    fn model(&self) -> &str {
        "canned-1"
    }

    async fn complete(
        &self,
        _messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .map(str::to_string)
            .ok_or_else(|| LlmError::Connection("connection refused".to_string()))
    }
}

fn answers() -> QuizAnswers {
    QuizAnswers {
        age: 27,
        gender: Gender::Male,
        height: Some(185),
        weight: Some(88.0),
        injuries: BTreeSet::new(),
        frequency: Frequency::Daily,
        experience: Experience::Advanced,
        court_type: CourtType::Outdoor,
        budget: Budget::Unlimited,
        position: None,
        style: Some(PlayStyle::Offensive),
        smash_frequency: None,
        net_style: None,
        baseline_style: None,
        game_pace: None,
        touch_preference: None,
        weight_preference: None,
    }
}

const POWER_REPLY: &str = "```json\n{\"power\": 9, \"control\": 5, \"comfort\": 5, \"maneuverability\": 6, \"rigidity\": 8, \"sweetspot\": 5, \"aiAnalysis\": \"Jugador de potencia.\"}\n```";

#[tokio::test]
async fn profile_survives_service_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let session = SessionId("player-42".to_string());
    let model = CannedModel::replying(POWER_REPLY);

    let first = ProfileService::new(
        Arc::new(JsonFileProfileStore::open(dir.path()).expect("store opens")),
        Arc::new(LlmAttributeProfiler::new(
            model.clone(),
            CompletionOptions::default(),
            "es",
        )),
    );
    let submitted = first
        .submit(&session, answers())
        .await
        .expect("submission succeeds");
    assert_eq!(submitted.targets.power, 9);
    assert_eq!(submitted.answers.injuries, BTreeSet::from([Injury::None]));
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);

    let second = ProfileService::new(
        Arc::new(JsonFileProfileStore::open(dir.path()).expect("store reopens")),
        Arc::new(LlmAttributeProfiler::new(
            CannedModel::unreachable(),
            CompletionOptions::default(),
            "es",
        )),
    );
    let restored = second
        .get(&session)
        .expect("store readable")
        .expect("profile persisted");

    assert_eq!(restored, submitted);
    assert!(restored.has_genuine_analysis());
}

#[tokio::test]
async fn unreachable_model_yields_low_confidence_ranking() {
    let dir = tempfile::tempdir().expect("temp dir");
    let session = SessionId("offline".to_string());
    let model = CannedModel::unreachable();
    let service = ProfileService::new(
        Arc::new(JsonFileProfileStore::open(dir.path()).expect("store opens")),
        Arc::new(LlmAttributeProfiler::new(
            model.clone(),
            CompletionOptions::default(),
            "es",
        )),
    );

    let profile = service
        .submit(&session, answers())
        .await
        .expect("fallback still finalizes");

    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    assert_eq!(profile.targets, AttributeTargets::FALLBACK);
    assert!(profile
        .ai_analysis
        .as_deref()
        .unwrap_or_default()
        .contains(FALLBACK_MARKER));

    let catalog = RacketCatalog::embedded().expect("embedded catalog");
    let engine = MatchEngine::default();
    let racket = catalog
        .get(&RacketId("nox-at10-genius-18k-2024".to_string()))
        .expect("racket present");
    let outcome = engine.evaluate(&profile, racket);
    let power = racket.characteristics.value_or(Characteristic::Power, 5);
    assert_eq!(
        outcome.penalty_for(PenaltyRule::AttributeDistance(Characteristic::Power)),
        6.0 * f64::from(power.abs_diff(5))
    );

    let ranked = engine.best_matches(&profile, &catalog, &RacketFilter::default(), 5);
    assert!(!ranked.is_empty());
    assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[tokio::test]
async fn scores_follow_the_stored_profile() {
    let dir = tempfile::tempdir().expect("temp dir");
    let session = SessionId("changing".to_string());
    let service = ProfileService::new(
        Arc::new(JsonFileProfileStore::open(dir.path()).expect("store opens")),
        Arc::new(LlmAttributeProfiler::new(
            CannedModel::replying(POWER_REPLY),
            CompletionOptions::default(),
            "es",
        )),
    );
    let catalog = RacketCatalog::embedded().expect("embedded catalog");
    let engine = MatchEngine::default();
    let racket = catalog
        .get(&RacketId("bullpadel-vertex-04-2024".to_string()))
        .expect("racket present");

    service.submit(&session, answers()).await.expect("submitted");
    let unlimited = service.get(&session).expect("readable").expect("present");
    let before = engine.score(&unlimited, racket);

    let mut economy = answers();
    economy.budget = Budget::Economy;
    service.submit(&session, economy).await.expect("resubmitted");
    let current = service.get(&session).expect("readable").expect("present");
    let after = engine.score(&current, racket);

    assert_eq!(after, before.saturating_sub(40));

    assert!(service.clear(&session).expect("cleared"));
    assert!(service.get(&session).expect("readable").is_none());
}

#[tokio::test]
async fn unsafe_session_ids_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = ProfileService::new(
        Arc::new(JsonFileProfileStore::open(dir.path()).expect("store opens")),
        Arc::new(LlmAttributeProfiler::new(
            CannedModel::replying(POWER_REPLY),
            CompletionOptions::default(),
            "es",
        )),
    );

    let err = service
        .submit(&SessionId("../escape".to_string()), answers())
        .await
        .expect_err("path traversal refused");

    assert!(matches!(
        err,
        padel_match::profile::ProfileServiceError::Store(StoreError::InvalidSession(_))
    ));
}
