//! HTTP routes and handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use moodjournal_core::{ClassificationResult, EnergyLabel, MoodLabel};
use moodjournal_storage::JournalEntry;
use serde::{Deserialize, Serialize};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, info};

use crate::error::AppError;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/classify", post(classify))
        .route("/entries", post(create_entry).get(list_entries))
        .fallback(fallback)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics_handle {
        Some(handle) => handle.render().into_response(),
        None => AppError::NotFound("metrics recorder is not installed".to_string()).into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    #[serde(default)]
    text: Option<String>,
}

async fn classify(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError> {
    metrics::counter!("moodjournal_requests_total", "route" => "classify").increment(1);
    let Json(req) = payload?;

    let analyzer = state.analyzer.clone();
    let result =
        tokio::task::spawn_blocking(move || analyzer.classify(req.text.as_deref())).await??;

    debug!(mood = %result.mood, energy = %result.energy, "Classified request");
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct CreateEntryRequest {
    text: String,
}

/// Flat entry shape returned by the API
#[derive(Debug, Serialize, Deserialize)]
pub struct EntryView {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub mood: MoodLabel,
    pub energy: EnergyLabel,
}

impl From<JournalEntry> for EntryView {
    fn from(entry: JournalEntry) -> Self {
        Self {
            id: entry.id,
            timestamp: entry.timestamp,
            text: entry.text,
            mood: entry.tags.mood,
            energy: entry.tags.energy,
        }
    }
}

async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EntryView>), AppError> {
    metrics::counter!("moodjournal_requests_total", "route" => "create_entry").increment(1);
    let Json(req) = payload?;

    if req.text.trim().is_empty() {
        return Err(AppError::InvalidRequest("text must not be empty".to_string()));
    }

    let analyzer = state.analyzer.clone();
    let store = state.store.clone();
    let entry = tokio::task::spawn_blocking(move || {
        let tags = analyzer.classify(Some(&req.text))?;
        store.persist(&req.text, tags)
    })
    .await??;

    metrics::counter!("moodjournal_entries_created_total").increment(1);
    info!(id = entry.id, mood = %entry.tags.mood, energy = %entry.tags.energy, "Created journal entry");

    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    limit: Option<usize>,
}

async fn list_entries(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<EntryView>>, AppError> {
    metrics::counter!("moodjournal_requests_total", "route" => "list_entries").increment(1);
    let Query(params) = params?;
    let limit = params.limit.unwrap_or(state.default_entries_limit);

    let store = state.store.clone();
    let entries = tokio::task::spawn_blocking(move || store.recent(limit)).await??;

    Ok(Json(entries.into_iter().map(EntryView::from).collect()))
}

async fn fallback() -> AppError {
    AppError::NotFound("Not found".to_string())
}
