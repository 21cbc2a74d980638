//! Error types for the DreamQuest API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dreamquest_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The job store backend could not be reached.
    #[error("job store error: {0}")]
    Store(#[source] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// The tracing pipeline could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::JobNotFound(_) => (StatusCode::NOT_FOUND, "job_not_found"),
            DomainError::BlueprintUnavailable(_) => (StatusCode::NOT_FOUND, "blueprint_not_found"),
            DomainError::JobNotReady(_) => (StatusCode::CONFLICT, "job_not_ready"),
            DomainError::InvalidTransition { .. } => (StatusCode::CONFLICT, "invalid_transition"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::StageFailed { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "stage_failed"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use dreamquest_core::job::JobStage;
    use uuid::Uuid;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_job_not_found_maps_to_404() {
        assert_eq!(
            status_of(DomainError::JobNotFound(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_blueprint_unavailable_maps_to_404() {
        assert_eq!(
            status_of(DomainError::BlueprintUnavailable(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_job_not_ready_maps_to_409() {
        assert_eq!(
            status_of(DomainError::JobNotReady(Uuid::new_v4())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_invalid_transition_maps_to_409() {
        assert_eq!(
            status_of(DomainError::InvalidTransition {
                job_id: Uuid::new_v4(),
                from: JobStage::Ready,
                to: JobStage::Analyzing,
            }),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_stage_failed_maps_to_500() {
        assert_eq!(
            status_of(DomainError::StageFailed {
                job_id: Uuid::new_v4(),
                stage: JobStage::Building,
                message: "disk full".into(),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("redis down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
