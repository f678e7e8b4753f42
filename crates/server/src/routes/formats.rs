// crates/server/src/routes/formats.rs
//! Export format catalog and dependency-check endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;
use exportd_core::FormatAvailability;

/// Response for GET /api/formats.
#[derive(Debug, Serialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatAvailability>,
}

/// Dependency report for one format. `satisfied` is derived: true when
/// `issues` is empty.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct DependencyReport {
    pub format: String,
    pub issues: Vec<String>,
    pub satisfied: bool,
}

/// GET /api/formats - Every supported format with host availability.
pub async fn list_formats(State(state): State<Arc<AppState>>) -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: state.manager.list_available_formats(),
    })
}

/// GET /api/formats/{id}/dependencies - Advisory dependency check for one
/// format. 404 for a format id not in the catalog.
pub async fn check_dependencies(
    State(state): State<Arc<AppState>>,
    Path(format_id): Path<String>,
) -> Result<Json<DependencyReport>, ApiError> {
    let issues = state
        .manager
        .check_dependencies(&format_id)
        .await
        .ok_or_else(|| ApiError::FormatNotFound(format_id.clone()))?;
    Ok(Json(DependencyReport {
        format: format_id,
        satisfied: issues.is_empty(),
        issues,
    }))
}

/// Create the format routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/formats", get(list_formats))
        .route("/formats/{id}/dependencies", get(check_dependencies))
}
