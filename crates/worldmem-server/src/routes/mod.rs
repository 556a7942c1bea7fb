//! API route modules.

pub mod health;
pub mod memory;

use axum::{Router, http::StatusCode, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    // The upstream game bot calls from another origin, so CORS stays open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .merge(memory::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Map a core error onto an HTTP response.
///
/// Engine failures are logged with full detail server-side and surfaced to
/// the caller as a generic message.
pub(crate) fn error_response(err: worldmem_core::Error) -> (StatusCode, String) {
    match err {
        worldmem_core::Error::NotReady => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
        worldmem_core::Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        worldmem_core::Error::Engine(engine_err) => {
            tracing::error!(error = %engine_err, "Knowledge engine operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Knowledge engine operation failed".to_string(),
            )
        }
    }
}
