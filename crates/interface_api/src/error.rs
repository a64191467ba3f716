//! API error handling
//!
//! Client errors echo their message. Internal errors are logged with a fresh
//! correlation id and only that id reaches the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::CorrelationId;
use domain_assessment::AssessmentError;

/// Message returned for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error ({correlation_id})")]
    Internal { correlation_id: CorrelationId },
}

impl ApiError {
    /// Logs `detail` under a new correlation id and returns the opaque error
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        let correlation_id = CorrelationId::new();
        error!(correlation_id = %correlation_id.as_uuid(), error = %detail, "Unhandled internal failure");
        ApiError::Internal { correlation_id }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<CorrelationId>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse { error: msg, correlation_id: None },
            ),
            ApiError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse { error: msg, correlation_id: None },
            ),
            ApiError::Internal { correlation_id } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: INTERNAL_ERROR_MESSAGE.to_string(),
                    correlation_id: Some(correlation_id),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        if err.is_client_error() {
            ApiError::Validation(err.to_string())
        } else {
            ApiError::internal(err)
        }
    }
}
