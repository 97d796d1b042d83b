use crate::cli::ServeArgs;
use crate::infra::{load_rate_book, AppState};
use crate::routes::with_estimation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pacific_estimator::config::AppConfig;
use pacific_estimator::error::AppError;
use pacific_estimator::telemetry;
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

    let rates = Arc::new(load_rate_book(&config.rates)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_estimation_routes(rates)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "pacific construction estimator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
