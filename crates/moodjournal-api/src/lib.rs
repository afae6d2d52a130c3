//! Mood Journal HTTP API
//!
//! Thin axum wrapper around the analyzer and the journal store. Routes:
//! - `GET /health`
//! - `POST /classify`
//! - `POST /entries`, `GET /entries?limit=N`
//! - `GET /metrics` (Prometheus text)

pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use cli::Cli;
pub use config::ApiConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
