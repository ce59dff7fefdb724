/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Request-level failures with an explicit status: invalid input, missing
 * credentials, resources the caller does not own, exceeded quotas.
 *
 * ## Infrastructure Errors
 *
 * - `DatabaseUnavailable` - the server was started without `DATABASE_URL`
 * - `DatabaseError` - a query failed
 * - `TokenError` - JWT encoding failed
 * - `PasswordError` - bcrypt failed
 *
 * Infrastructure errors are logged with full detail but rendered to the
 * client as a generic message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use chatbox_saas::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid input, missing resource)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// No database pool is configured
    #[error("Database not configured")]
    DatabaseUnavailable,

    /// Database query failure
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// JWT encoding failure
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    /// Password hashing or verification failure
    #[error("Password error: {0}")]
    PasswordError(#[from] bcrypt::BcryptError),

    /// Validation error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn not_found(what: &str) -> Self {
        Self::handler(StatusCode::NOT_FOUND, format!("{} not found", what))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `DatabaseUnavailable` - 503 Service Unavailable
    /// - `SharedError` - 400 Bad Request, except serialization (500)
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::UnknownVariant { .. } => StatusCode::BAD_REQUEST,
            },
            Self::DatabaseError(_)
            | Self::TokenError(_)
            | Self::PasswordError(_)
            | Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::DatabaseUnavailable => "Database not configured".to_string(),
            Self::SharedError(err) => err.to_string(),
            Self::DatabaseError(_)
            | Self::TokenError(_)
            | Self::PasswordError(_)
            | Self::SerializationError(_) => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid request");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::unauthorized().status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            BackendError::DatabaseUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            BackendError::DatabaseError(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(BackendError::not_found("Chatbox").status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_from_shared_error() {
        let backend_error: BackendError = SharedError::validation("field", "message").into();
        assert_eq!(backend_error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_detail_is_not_exposed() {
        let error = BackendError::DatabaseError(sqlx::Error::PoolTimedOut);
        assert_eq!(error.message(), "Internal server error");
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(BackendError::not_found("Chatbox").message(), "Chatbox not found");
    }
}
