// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationFailed { field: String, message: String },
    DuplicateFavorite(String),

    // 401 Unauthorized
    Unauthenticated(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    PersistenceFailure(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationFailed { .. } => 400,
            ApiError::DuplicateFavorite(_) => 400,
            ApiError::Unauthenticated(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::PersistenceFailure(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationFailed { message, .. } => message,
            ApiError::DuplicateFavorite(msg) => msg,
            ApiError::Unauthenticated(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::PersistenceFailure(msg) => msg,
        }
    }

    /// Convert to the `{ message, data }` JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "message": self.message(),
            "data": Value::Null,
        })
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn duplicate_favorite(message: impl Into<String>) -> Self {
        ApiError::DuplicateFavorite(message.into())
    }

    pub fn validation_failed(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wrap a data-access failure with the fixed user-facing message for the
    /// operation that failed. The underlying error is logged, not returned.
    pub fn persistence(err: StoreError, user_message: impl Into<String>) -> Self {
        tracing::error!("store error: {}", err);
        ApiError::PersistenceFailure(user_message.into())
    }
}

impl From<crate::database::models::ValidationError> for ApiError {
    fn from(err: crate::database::models::ValidationError) -> Self {
        ApiError::ValidationFailed {
            field: err.field,
            message: err.message,
        }
    }
}

// Default mapping for store errors that escape without an operation-specific
// message attached.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::persistence(err, "An error occurred while processing your request.")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
