use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tera::Tera;

use common::client::ExecutorSource;
use common::config::Settings;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ExecutorSource>,
    pub templates: Arc<Tera>,
    pub config: Arc<Settings>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(source: Arc<dyn ExecutorSource>, templates: Tera, config: Settings) -> Self {
        Self {
            source,
            templates: Arc::new(templates),
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Attach the Prometheus handle rendered by `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
