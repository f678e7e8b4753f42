// crates/server/src/lib.rs
//! Exportd server library.
//!
//! This crate provides the Axum-based HTTP server for the export job
//! manager. It serves a REST API for submitting model export jobs and
//! polling their progress.

pub mod error;
pub mod routes;
pub mod state;

pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use exportd_core::ExportManager;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (health, formats, exports, artifacts)
/// - CORS for development (allows any origin)
/// - Request tracing
pub fn create_app(manager: Arc<ExportManager>) -> Router {
    let state = AppState::new(manager);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
