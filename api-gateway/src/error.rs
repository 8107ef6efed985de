//! Error handling for the API gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::Error;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The node is still syncing
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    Common(#[from] Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable"),
            ApiError::Common(e) => match e {
                // Client errors (4xx)
                Error::InvalidFormat(_) => (StatusCode::BAD_REQUEST, "invalid_format"),
                Error::Overflow(_) => (StatusCode::BAD_REQUEST, "overflow"),
                Error::Underflow(_) => (StatusCode::BAD_REQUEST, "underflow"),
                Error::UnknownEnumValue(_) => (StatusCode::BAD_REQUEST, "unknown_enum_value"),
                Error::InvalidPublicKey(_) => (StatusCode::BAD_REQUEST, "invalid_public_key"),
                Error::InvalidAccessGroup(_) => (StatusCode::BAD_REQUEST, "invalid_access_group"),
                Error::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                Error::InsufficientBalance(_) => (StatusCode::BAD_REQUEST, "insufficient_balance"),
                Error::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),

                // Server errors (5xx)
                Error::View(_) => (StatusCode::INTERNAL_SERVER_ERROR, "chain_view_error"),
                Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
                Error::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();

        // Log the error with request ID for backend tracing
        tracing::error!("API Error [{}]: {:?}", request_id, &self);

        let (status, code) = self.status_and_code();

        let details = match &self {
            ApiError::Common(e) if e.is_arithmetic() => {
                Some(serde_json::json!({ "arithmetic": true }))
            }
            _ => None,
        };

        let error_response = ErrorResponse {
            error: ErrorInfo {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
            request_id: Some(request_id),
        };

        (status, Json(error_response)).into_response()
    }
}
