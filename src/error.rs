// Error handling module for the Geo API
// Provides the HTTP-facing error type and response conversion

use crate::auth::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, warn};

/// Main error type for the API
/// All handlers should return Result<T, ApiError>
#[derive(Debug)]
pub enum ApiError {
    /// A single failed input rule
    /// Maps to HTTP 400 Bad Request
    ValidationError(validator::ValidationError),

    /// Duplicate resource conflict
    /// Maps to HTTP 409 Conflict
    Conflict { message: String },

    /// Authentication failures
    /// Maps to HTTP 401 Unauthorized
    Unauthorized(String),

    /// Internal server errors
    /// Maps to HTTP 500, details are only logged
    InternalError(String),
}

/// Consistent error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR", "CONFLICT")
    pub error_code: String,

    /// Human-readable error message
    pub message: String,

    /// Omitted from JSON when None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// RFC 3339 timestamp of when the error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    fn new(error_code: &str, message: String, details: Option<serde_json::Value>) -> Self {
        Self {
            error_code: error_code.to_string(),
            message,
            details,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

impl ApiError {
    /// Convert ApiError to HTTP status code and ErrorResponse
    ///
    /// Logs at error! for 500s, warn! for auth failures and conflicts,
    /// debug! for validation.
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::ValidationError(err) => {
                debug!("Validation error: {}", err.code);

                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Request validation failed".to_string());
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        "VALIDATION_ERROR",
                        message,
                        Some(json!({ "code": err.code })),
                    ),
                )
            }
            ApiError::Conflict { message } => {
                warn!("Conflict error: {}", message);

                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("CONFLICT", message.clone(), None),
                )
            }
            ApiError::Unauthorized(message) => {
                warn!("Unauthorized access attempt: {}", message);

                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("UNAUTHORIZED", message.clone(), None),
                )
            }
            ApiError::InternalError(internal_msg) => {
                error!("Internal error: {}", internal_msg);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "INTERNAL_ERROR",
                        "An internal server error occurred".to_string(),
                        None,
                    ),
                )
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert authentication core errors to ApiError
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => ApiError::ValidationError(e),
            AuthError::Conflict(_) => ApiError::Conflict {
                message: err.public_message(),
            },
            AuthError::PasswordHash(_)
            | AuthError::TokenGeneration(_)
            | AuthError::Repository(_) => ApiError::InternalError(err.to_string()),
        }
    }
}
