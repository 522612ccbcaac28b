//! # Request Errors
//!
//! Failures are classified even though the default policy reports all of
//! them as 500. The body is always `{"error": "<message>"}` with the
//! underlying message, store text included.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use super::config::ErrorStatusPolicy;
use crate::store::StoreError;

/// Result type for request handling
pub type ApiResult<T> = Result<T, ApiError>;

/// Request handling errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Body missing, not JSON, or a field absent / wrongly typed
    #[error("{0}")]
    BadRequest(String),

    /// Table already exists
    #[error("{0}")]
    Conflict(String),

    /// The store rejected the statement
    #[error("{0}")]
    StoreFailure(String),
}

impl ApiError {
    /// HTTP status for this error under `policy`
    pub fn status_code(&self, policy: ErrorStatusPolicy) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => policy.bad_request(),
            ApiError::Conflict(_) => policy.conflict(),
            ApiError::StoreFailure(_) => policy.store_failure(),
        }
    }

    /// Status and JSON body for the response
    pub fn into_reply(self, policy: ErrorStatusPolicy) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.status_code(policy);
        (status, Json(ErrorResponse::from(self)))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            other => ApiError::StoreFailure(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
