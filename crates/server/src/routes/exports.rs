// crates/server/src/routes/exports.rs
//! Export job submission and polling endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;
use exportd_core::{ExportOptions, JobSnapshot};

/// Request body for POST /api/exports.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub model_path: String,
    pub format: String,
    #[serde(default)]
    pub options: ExportOptions,
}

/// Response for an accepted submission.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub job_id: String,
}

/// Response for GET /api/exports.
#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobSnapshot>,
}

/// POST /api/exports - Submit a new export job.
///
/// Validates the format id and model path, then returns 202 with the job
/// id while the conversion runs in the background. Poll
/// GET /api/exports/{id} for progress.
pub async fn submit_export(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let job_id = state
        .manager
        .submit(req.model_path, &req.format, req.options)
        .await?;
    Ok((StatusCode::ACCEPTED, Json(SubmitResponse { job_id })))
}

/// GET /api/exports - Snapshots of every known export job.
pub async fn list_exports(State(state): State<Arc<AppState>>) -> Json<JobListResponse> {
    Json(JobListResponse {
        jobs: state.manager.list(),
    })
}

/// GET /api/exports/{id} - Snapshot of one export job.
pub async fn get_export(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Result<Json<JobSnapshot>, ApiError> {
    state
        .manager
        .status(&job_id)
        .map(Json)
        .ok_or(ApiError::JobNotFound(job_id))
}

/// Create the export routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/exports", post(submit_export).get(list_exports))
        .route("/exports/{id}", get(get_export))
}
