use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryDiagnosisRepository, InMemoryEventPublisher};
use crate::routes::with_diagnosis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use pulsecheck::config::AppConfig;
use pulsecheck::error::AppError;
use pulsecheck::telemetry;
use pulsecheck::workflows::diagnosis::{DiagnosisService, MessageCatalog, Questionnaire};
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

    let repository = Arc::new(InMemoryDiagnosisRepository::default());
    let events = Arc::new(InMemoryEventPublisher::default());
    let diagnosis_service = Arc::new(DiagnosisService::new(
        repository,
        events,
        MessageCatalog::standard(),
        Questionnaire::standard(),
    ));

    let app = with_diagnosis_routes(diagnosis_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
