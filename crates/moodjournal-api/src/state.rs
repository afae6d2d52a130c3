use crate::config::ApiConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use moodjournal_classifiers::MoodAnalyzer;
use moodjournal_storage::JournalStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read-only classification pipeline
    pub analyzer: Arc<MoodAnalyzer>,

    pub store: Arc<JournalStore>,

    /// Prometheus handle for rendering; `None` when no recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,

    /// Entries returned by `GET /entries` without a `limit`
    pub default_entries_limit: usize,

    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(analyzer: Arc<MoodAnalyzer>, store: Arc<JournalStore>) -> Self {
        let defaults = ApiConfig::default();
        Self {
            analyzer,
            store,
            metrics_handle: None,
            default_entries_limit: defaults.default_entries_limit,
            max_body_bytes: defaults.max_body_bytes,
        }
    }

    /// Build the analyzer and open the store.
    ///
    /// Fails when the configured encoder cannot be loaded.
    pub fn from_config(config: &ApiConfig) -> moodjournal_core::Result<Self> {
        let analyzer = MoodAnalyzer::from_config(&config.analyzer)?;
        let store = JournalStore::from_config(&config.storage);

        Ok(Self {
            analyzer: Arc::new(analyzer),
            store: Arc::new(store),
            metrics_handle: None,
            default_entries_limit: config.default_entries_limit,
            max_body_bytes: config.max_body_bytes,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
