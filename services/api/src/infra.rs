use autovalue::config::AppConfig;
use autovalue::error::AppError;
use autovalue::valuation::ValuationEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine tuned by the environment, for one-shot CLI commands.
pub(crate) fn configured_engine() -> Result<ValuationEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(ValuationEngine::new(config.valuation))
}
