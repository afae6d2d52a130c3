//! Mood Journal API server
//!
//! Classifies journal entries and stores them in a JSON file.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

use moodjournal_api::telemetry::{init_metrics, init_tracing};
use moodjournal_api::{create_router, ApiConfig, AppState, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    info!("Starting Mood Journal API");

    let config = ApiConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Journal: {}", config.storage.path.display());

    let metrics_handle = init_metrics()?;

    // Model loading may download weights; keep it off the async workers
    info!("Initializing classifier...");
    let state_config = config.clone();
    let state = tokio::task::spawn_blocking(move || AppState::from_config(&state_config))
        .await??
        .with_metrics(metrics_handle);
    info!("Classifier ready: {}", state.analyzer.strategy_name());

    let addr: SocketAddr = format!("{}:{}", config.listen, config.port).parse()?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
