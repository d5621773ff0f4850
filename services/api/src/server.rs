use crate::cli::ServeArgs;
use crate::infra::{build_intelligence_service, AppState};
use crate::routes::with_intelligence_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use travel_intel::config::AppConfig;
use travel_intel::error::AppError;
use travel_intel::telemetry;
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = build_intelligence_service(&config.intelligence);

    let app = with_intelligence_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        cache_enabled = config.intelligence.cache_enabled,
        cache_ttl_secs = config.intelligence.cache_ttl_secs,
        "travel intelligence service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
