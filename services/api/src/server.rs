use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryEventRepository, InMemoryRegistrationNotifier, OutlookState};
use crate::routes::with_event_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use events_core::config::AppConfig;
use events_core::error::AppError;
use events_core::events::{EligibilityEngine, EventRegistrationService};
use events_core::telemetry;
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

    let repository = Arc::new(InMemoryEventRepository::default());
    let notifier = Arc::new(InMemoryRegistrationNotifier::default());
    let registration_service = Arc::new(EventRegistrationService::new(
        repository.clone(),
        notifier,
        config.registration,
    ));
    let outlook_state = OutlookState {
        repository,
        engine: Arc::new(EligibilityEngine::new(config.registration)),
    };

    let app = with_event_routes(registration_service)
        .layer(Extension(app_state))
        .layer(Extension(outlook_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "community events service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
