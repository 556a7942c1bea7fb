//! Health and service-info endpoints.
//!
//! These answer in every readiness state, including degraded.

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::state::AppState;

/// Service name reported by health and the root descriptor.
pub const SERVICE_NAME: &str = "worldmem-memory-service";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub engine_initialized: bool,
    pub uptime_seconds: u64,
    pub worlds_tracked: usize,
    pub facts_cached: usize,
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let readiness = state.memory.readiness();
    let stats = state.memory.cache_stats().await;

    Json(HealthResponse {
        status: readiness.health_status().to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        engine_initialized: readiness.is_ready(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        worlds_tracked: stats.worlds,
        facts_cached: stats.facts,
    })
}

/// Root endpoint - service descriptor
pub async fn root(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": state.memory.readiness().service_status(),
        "endpoints": {
            "health": "GET /health",
            "remember": "POST /remember",
            "recall": "POST /recall",
            "clear_world": "DELETE /clear_world/{world_id}"
        }
    }))
}
