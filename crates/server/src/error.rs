// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use exportd_core::SubmitError;

/// Structured JSON error response for API errors
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unsupported export format: {0}")]
    UnknownFormat(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Format not found: {0}")]
    FormatNotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::UnknownFormat(format) => ApiError::UnknownFormat(format),
            SubmitError::ModelNotFound(path) => {
                ApiError::ModelNotFound(path.display().to_string())
            }
            SubmitError::Registry(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::UnknownFormat(format) => {
                tracing::error!(format = %format, "Unsupported export format");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details(
                        "Unsupported export format",
                        format!("Format: {format}"),
                    ),
                )
            }
            ApiError::ModelNotFound(path) => {
                tracing::error!(model = %path, "Model not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Model not found", format!("Path: {path}")),
                )
            }
            ApiError::JobNotFound(id) => {
                tracing::error!(job_id = %id, "Job not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Job not found", format!("Job ID: {id}")),
                )
            }
            ApiError::FormatNotFound(id) => {
                tracing::error!(format = %id, "Format not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Format not found", format!("Format: {id}")),
                )
            }
            ApiError::BadRequest(msg) => {
                tracing::error!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg.clone()))
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::path::PathBuf;

    async fn response_parts(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_unknown_format_is_400() {
        let (status, body) = response_parts(ApiError::UnknownFormat("gguf".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Unsupported export format");
        assert_eq!(body.details.as_deref(), Some("Format: gguf"));
    }

    #[tokio::test]
    async fn test_job_not_found_is_404() {
        let (status, body) = response_parts(ApiError::JobNotFound("export_1_0".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Job not found");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let (status, body) =
            response_parts(ApiError::Internal("registry mutex poisoned".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_submit_error_conversion() {
        let err: ApiError = SubmitError::UnknownFormat("gguf".to_string()).into();
        assert!(matches!(err, ApiError::UnknownFormat(_)));

        let err: ApiError = SubmitError::ModelNotFound(PathBuf::from("/weights/best.pt")).into();
        assert!(matches!(err, ApiError::ModelNotFound(ref p) if p == "/weights/best.pt"));
    }
}
