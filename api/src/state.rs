use std::sync::Arc;

use common::config::Settings;
use common::storage::BookingStore;
use metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub config: Arc<Settings>,
    /// Present only when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn BookingStore>,
        config: Settings,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            store,
            config: Arc::new(config),
            metrics,
        }
    }
}
