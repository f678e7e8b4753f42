//! API route handlers for the exportd server.

pub mod artifacts;
pub mod exports;
pub mod formats;
pub mod health;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET /api/health - Health check
/// - GET /api/formats - Supported export formats with host availability
/// - GET /api/formats/{id}/dependencies - Advisory dependency check
/// - POST /api/exports - Submit an export job (202 + job id)
/// - GET /api/exports - List all export jobs
/// - GET /api/exports/{id} - Poll one export job
/// - GET /api/artifacts?dir=… - Exported models found in a directory
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", formats::router())
        .nest("/api", exports::router())
        .nest("/api", artifacts::router())
        .with_state(state)
}
