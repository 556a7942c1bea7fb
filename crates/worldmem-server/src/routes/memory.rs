//! World memory routes.
//!
//! - POST /remember - Store facts for one world
//! - POST /recall - Query one world's memory
//! - DELETE /clear_world/{world_id} - Drop the local record of one world

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use worldmem_core::service::{DEFAULT_RECALL_LIMIT, MAX_RECALL_LIMIT, MIN_RECALL_LIMIT};

use super::error_response;
use crate::state::AppState;

/// Create memory router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/remember", post(remember))
        .route("/recall", post(recall))
        .route("/clear_world/{world_id}", delete(clear_world))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RememberRequest {
    pub world_id: String,
    pub facts: Vec<String>,
    /// Accepted for forward compatibility; not interpreted.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct RememberResponse {
    pub success: bool,
    pub world_id: String,
    pub facts_stored: usize,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RecallRequest {
    pub world_id: String,
    pub query: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecallResponse {
    pub success: bool,
    pub world_id: String,
    pub query: String,
    pub results: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearWorldResponse {
    pub success: bool,
    pub world_id: String,
    pub message: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Store facts for one world
pub async fn remember(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RememberRequest>,
) -> Result<Json<RememberResponse>, (StatusCode, String)> {
    if let Some(metadata) = &req.metadata {
        tracing::debug!(world_id = %req.world_id, %metadata, "Ignoring remember metadata");
    }

    let stored = state
        .memory
        .remember(&req.world_id, &req.facts)
        .await
        .map_err(error_response)?;

    Ok(Json(RememberResponse {
        success: true,
        world_id: req.world_id,
        facts_stored: stored,
        message: format!("Successfully stored {stored} facts"),
    }))
}

/// Query one world's memory
pub async fn recall(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecallRequest>,
) -> Result<Json<RecallResponse>, (StatusCode, String)> {
    let limit = req.limit.unwrap_or(DEFAULT_RECALL_LIMIT);
    if !(MIN_RECALL_LIMIT..=MAX_RECALL_LIMIT).contains(&limit) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("limit must be between {MIN_RECALL_LIMIT} and {MAX_RECALL_LIMIT}"),
        ));
    }

    let results = state
        .memory
        .recall(&req.world_id, &req.query, limit)
        .await
        .map_err(error_response)?;

    let count = results.len();
    Ok(Json(RecallResponse {
        success: true,
        world_id: req.world_id,
        query: req.query,
        results,
        count,
    }))
}

/// Drop the local record of one world
pub async fn clear_world(
    State(state): State<Arc<AppState>>,
    Path(world_id): Path<String>,
) -> Result<Json<ClearWorldResponse>, (StatusCode, String)> {
    let cleared = state
        .memory
        .clear_world(&world_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ClearWorldResponse {
        success: true,
        world_id: world_id.clone(),
        message: format!("Cleared {cleared} cached fact(s) for world {world_id}"),
    }))
}
