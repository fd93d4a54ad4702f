use crate::cli::ServeArgs;
use crate::infra::{start_meter, AppState};
use crate::routes::with_meter_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use strength_meter::config::AppConfig;
use strength_meter::error::AppError;
use strength_meter::telemetry;
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

    let meter = start_meter(config.meter.clone())?;
    info!(
        model = %meter.model_version,
        cache_capacity = config.meter.cache_capacity,
        min_length = config.meter.min_length,
        "strength meter initialised"
    );

    let app = with_meter_routes(meter.engine.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "strength meter ready");

    let served = axum::serve(listener, app).await;
    meter.worker.abort();
    served?;
    Ok(())
}
