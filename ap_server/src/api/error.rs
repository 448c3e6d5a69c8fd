//! API error types and their HTTP mapping.

use age_policy::EligibilityError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors returned by the eligibility endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    /// Well-formed JSON describing invalid eligibility input
    #[error("{0}")]
    Eligibility(#[from] EligibilityError),

    /// Body missing, not JSON, or not the expected shape
    #[error("Invalid request body: {0}")]
    InvalidJson(String),

    /// Batch over the configured limit
    #[error("Too many {what}: {count} exceeds the limit of {limit}")]
    BatchTooLarge {
        what: &'static str,
        count: usize,
        limit: usize,
    },

    /// Server-side failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Eligibility(_) | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code for the response body and metrics labels
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Eligibility(e) => e.code(),
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::BatchTooLarge { .. } => "BATCH_TOO_LARGE",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    /// Get a client-safe error message
    ///
    /// Internal errors are sanitized; everything else describes the caller's input.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Field-level failures raised while deserializing, such as a venue time not
/// in `HH:MM` form, land here with their message kept in the body text.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidJson(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!("Internal error: {}", detail);
        }
        let body = json!({
            "success": false,
            "error": self.client_message(),
            "code": self.code(),
        });
        (self.status(), Json(body)).into_response()
    }
}
