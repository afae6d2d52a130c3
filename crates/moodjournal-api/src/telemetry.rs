//! Logging and metrics setup for the server binary

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;

/// Initialize tracing/logging
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("moodjournal=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moodjournal=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Install the Prometheus recorder and return the handle for `/metrics`
pub fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "moodjournal_requests_total",
        "Total number of API requests by route"
    );
    metrics::describe_counter!(
        "moodjournal_classifications_total",
        "Classifications by mood, energy and decision path"
    );
    metrics::describe_counter!(
        "moodjournal_entries_created_total",
        "Journal entries persisted through the API"
    );
    metrics::describe_histogram!(
        "moodjournal_classify_latency_us",
        metrics::Unit::Microseconds,
        "Classification latency in microseconds"
    );
    metrics::describe_counter!("moodjournal_errors_total", "Total number of API errors by type");

    tracing::info!("Metrics exporter initialized");
    Ok(handle)
}
