/// Health check API routes
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use tuneline_resolver::CacheStats;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cache: CacheStats,
}

/// GET /api/health - Health check endpoint
pub async fn health(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: app_state.coordinator.cache_stats().await,
    })
}
