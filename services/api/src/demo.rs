use crate::infra::{build_identifier, build_profiler, load_catalog, InMemoryProfileStore};
use clap::Args;
use padel_match::catalog::{RacketCatalog, Shape};
use padel_match::config::{AppConfig, StorageConfig};
use padel_match::error::AppError;
use padel_match::identify::image_attachment;
use padel_match::profile::{
    AttributeProfiler, Budget, CourtType, DisabledProfiler, Experience, Frequency, Gender, Injury,
    NetStyle, PlayStyle, PlayerProfile, Position, ProfileService, QuizAnswers, SessionId,
    TouchPreference,
};
use padel_match::scoring::{MatchEngine, RacketFilter, RankedRacket};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file holding a finalized profile or raw questionnaire answers
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Number of rackets to print
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
    /// Only rank rackets from this brand
    #[arg(long)]
    pub(crate) brand: Option<String>,
    /// Only rank rackets with this head shape (round, teardrop, diamond, hybrid)
    #[arg(long)]
    pub(crate) shape: Option<String>,
    /// Catalog file to use instead of the configured one (JSON or CSV)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct IdentifyArgs {
    /// Photo of the racket
    #[arg(long)]
    pub(crate) image: PathBuf,
    /// Catalog file to use instead of the configured one (JSON or CSV)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of rackets to print
    #[arg(long, default_value_t = 5)]
    pub(crate) limit: usize,
    /// Skip the AI profiler even when one is configured
    #[arg(long)]
    pub(crate) offline: bool,
}

fn catalog_for(
    override_path: Option<PathBuf>,
    storage: &StorageConfig,
) -> Result<RacketCatalog, AppError> {
    let storage = StorageConfig {
        catalog_path: override_path.or_else(|| storage.catalog_path.clone()),
        profile_dir: None,
    };
    Ok(load_catalog(&storage)?)
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        profile,
        limit,
        brand,
        shape,
        catalog,
    } = args;

    let config = AppConfig::load()?;
    let catalog = catalog_for(catalog, &config.storage)?;

    let raw = std::fs::read_to_string(&profile)?;
    let player: PlayerProfile = serde_json::from_str(&raw)
        .map_err(|err| AppError::InvalidInput(format!("{}: {err}", profile.display())))?;
    let shape = shape
        .map(|raw| {
            Shape::parse(&raw)
                .ok_or_else(|| AppError::InvalidInput(format!("unknown shape '{raw}'")))
        })
        .transpose()?;

    let filter = RacketFilter {
        brand,
        shape,
        max_price: None,
    };
    if !player.is_initialized() {
        println!("Profile has no play style yet; every racket scores 0.");
        return Ok(());
    }
    if !player.has_genuine_analysis() {
        println!("Profile targets are defaults; power and control carry reduced weight.");
    }

    let ranked = MatchEngine::default().best_matches(&player, &catalog, &filter, limit);
    render_ranking(&ranked);
    Ok(())
}

pub(crate) async fn run_identify(args: IdentifyArgs) -> Result<(), AppError> {
    let IdentifyArgs { image, catalog } = args;

    let config = AppConfig::load()?;
    let catalog = catalog_for(catalog, &config.storage)?;
    let identifier = build_identifier(&config.profiler).ok_or_else(|| {
        AppError::Unavailable("gear identification without an AI endpoint".to_string())
    })?;

    let mime_type = mime_guess::from_path(&image).first_or_octet_stream();
    let bytes = std::fs::read(&image)?;
    let attachment = image_attachment(mime_type.essence_str(), bytes)?;

    let found = identifier.identify(&attachment, &catalog).await?;
    let identification = &found.identification;
    println!(
        "Identified {} {}{} (confidence {}%)",
        identification.brand,
        identification.model,
        identification
            .year
            .map(|year| format!(" {year}"))
            .unwrap_or_default(),
        identification.confidence
    );
    if !identification.analysis.is_empty() {
        println!("  {}", identification.analysis);
    }

    if found.candidates.is_empty() {
        println!("No matching rackets in the catalog.");
    } else {
        println!("Catalog candidates:");
        for racket in &found.candidates {
            println!("  - {} [{}] {}", racket.display_name(), racket.id, racket.price_range);
        }
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { limit, offline } = args;

    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.storage)?;
    let profiler: Arc<dyn AttributeProfiler> = if offline {
        Arc::new(DisabledProfiler)
    } else {
        build_profiler(&config.profiler)
    };

    println!("Padel match demo ({} rackets in catalog)", catalog.len());

    let store = Arc::new(InMemoryProfileStore::default());
    let service = ProfileService::new(store, profiler);
    let session = SessionId("demo".to_string());

    let profile = match service.submit(&session, demo_answers()).await {
        Ok(profile) => profile,
        Err(err) => {
            println!("  Questionnaire rejected: {}", err);
            return Ok(());
        }
    };

    let targets = profile.targets;
    println!(
        "- Targets: power {} | control {} | comfort {} | maneuverability {} | rigidity {} | sweetspot {}",
        targets.power,
        targets.control,
        targets.comfort,
        targets.maneuverability,
        targets.rigidity,
        targets.sweetspot
    );
    if let Some(analysis) = &profile.ai_analysis {
        println!("  Analysis: {}", analysis);
    }
    if let Some(finalized_at) = profile.finalized_at {
        println!("  Finalized at {}", finalized_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    let engine = MatchEngine::default();
    let ranked = engine.best_matches(&profile, &catalog, &RacketFilter::default(), limit);
    println!("\nBest matches");
    render_ranking(&ranked);

    let Some(top) = ranked.first() else {
        return Ok(());
    };
    let outcome = engine.evaluate(&profile, top.racket);
    println!(
        "\nWhy {} scores {} (total penalty {:.1}):",
        top.racket.display_name(),
        outcome.score,
        outcome.total_penalty
    );
    for component in &outcome.components {
        println!("    - {:>5.1}  {}", component.penalty, component.notes);
    }

    Ok(())
}

fn render_ranking(ranked: &[RankedRacket<'_>]) {
    if ranked.is_empty() {
        println!("  No rackets scored above zero.");
        return;
    }
    for (position, entry) in ranked.iter().enumerate() {
        println!(
            "  {:>2}. {:>3}  {} [{} / {}] {}",
            position + 1,
            entry.score,
            entry.racket.display_name(),
            entry.racket.shape.label(),
            entry.racket.balance.label(),
            entry.racket.price_range
        );
    }
}

fn demo_answers() -> QuizAnswers {
    QuizAnswers {
        age: 38,
        gender: Gender::Male,
        height: Some(181),
        weight: Some(84.0),
        injuries: BTreeSet::from([Injury::Elbow]),
        frequency: Frequency::SeveralPerWeek,
        experience: Experience::Intermediate,
        court_type: CourtType::Indoor,
        budget: Budget::Performance,
        position: Some(Position::Left),
        style: Some(PlayStyle::Balanced),
        smash_frequency: None,
        net_style: Some(NetStyle::Placement),
        baseline_style: None,
        game_pace: None,
        touch_preference: Some(TouchPreference::Medium),
        weight_preference: Some(360),
    }
}
