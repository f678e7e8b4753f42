// crates/server/src/routes/artifacts.rs
//! Exported artifact discovery endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use exportd_core::{artifacts, ExportedArtifact};

/// Query parameters for GET /api/artifacts.
#[derive(Debug, Deserialize)]
pub struct ArtifactsQuery {
    /// Directory to scan for exported models.
    pub dir: PathBuf,
}

/// Response for GET /api/artifacts.
#[derive(Debug, Serialize)]
pub struct ArtifactsResponse {
    pub artifacts: Vec<ExportedArtifact>,
}

/// GET /api/artifacts?dir=… - Exported models found in a directory.
///
/// A missing or unreadable directory yields an empty list rather than an
/// error; the scan is best effort.
pub async fn list_artifacts(
    State(_state): State<Arc<AppState>>,
    Query(query): Query<ArtifactsQuery>,
) -> Json<ArtifactsResponse> {
    Json(ArtifactsResponse {
        artifacts: artifacts::scan_exported_models(&query.dir).await,
    })
}

/// Create the artifact routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/artifacts", get(list_artifacts))
}
