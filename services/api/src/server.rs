use crate::cli::ServeArgs;
use crate::infra::{build_identifier, build_profiler, load_catalog, AppState, ProfileBackend};
use crate::routes::with_match_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use padel_match::config::AppConfig;
use padel_match::error::AppError;
use padel_match::profile::ProfileService;
use padel_match::router::MatchApi;
use padel_match::scoring::MatchEngine;
use padel_match::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(load_catalog(&config.storage)?);
    let store = Arc::new(ProfileBackend::from_config(&config.storage)?);
    let profiles = ProfileService::new(store, build_profiler(&config.profiler));

    let mut api = MatchApi::new(profiles, catalog, MatchEngine::default());
    if let Some(identifier) = build_identifier(&config.profiler) {
        api = api.with_identifier(identifier);
    }

    let app = with_match_routes(Arc::new(api))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model = %config.profiler.model,
        "padel match service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
