use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use strength_meter::config::MeterConfig;
use strength_meter::error::AppError;
use strength_meter::meter::{
    spawn_guess_worker, BruteForceModel, MeterServices, QueuedEstimator, ScoreFusionEngine,
};
use tokio::task::JoinHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Fusion engine wired to a background guess-number worker.
pub(crate) struct MeterRuntime {
    pub(crate) engine: Arc<ScoreFusionEngine>,
    pub(crate) model_version: String,
    pub(crate) worker: JoinHandle<()>,
}

/// Build the engine with the built-in rules and policy, answering guess-number queries with
/// the exhaustive-search model. Must be called inside a tokio runtime.
pub(crate) fn start_meter(config: MeterConfig) -> Result<MeterRuntime, AppError> {
    let (estimator, queries) = QueuedEstimator::channel();
    let services = MeterServices::builtin(config, Arc::new(estimator))?;
    let engine = Arc::new(ScoreFusionEngine::new(&services));
    let worker = spawn_guess_worker(queries, Arc::new(BruteForceModel), engine.clone());

    Ok(MeterRuntime {
        engine,
        model_version: services.model.version.clone(),
        worker,
    })
}
