//! Error types for orrery-daemon

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use orrery_types::{ErrorBody, ValidationError};
use thiserror::Error;

/// Message returned for any incomplete planet submission
pub const MISSING_FIELDS_MESSAGE: &str = "All required fields must be filled in";

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Imagery client could not be built
    #[error("Imagery error: {0}")]
    Imagery(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Invalid data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error
    #[error("Query error: {0}")]
    Query(String),
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Planet submission refused
    #[error("{}", validation_message(.0))]
    Validation(#[from] ValidationError),

    /// Storage failure; the message names the operation, not the cause
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: StorageError,
    },

    /// Upstream imagery failure
    #[error("{context}")]
    Upstream {
        context: &'static str,
        reason: String,
    },
}

impl ApiError {
    pub fn storage(context: &'static str, source: StorageError) -> Self {
        tracing::error!(error = %source, "{}", context);
        Self::Storage { context, source }
    }

    pub fn upstream(context: &'static str, reason: impl ToString) -> Self {
        let reason = reason.to_string();
        tracing::warn!(reason = %reason, "{}", context);
        Self::Upstream { context, reason }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ApiError::Upstream { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
        }
    }
}

fn validation_message(error: &ValidationError) -> String {
    match error {
        ValidationError::MissingField(_) => MISSING_FIELDS_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = ErrorBody {
            error: self.to_string(),
            code: Some(code.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("planet:1".to_string())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );

        assert_eq!(
            ApiError::Validation(ValidationError::MissingField("pseudo"))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );

        assert_eq!(
            ApiError::upstream("Failed to fetch NASA images", "timeout")
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_hide_causes() {
        let err = ApiError::storage(
            "Failed to save planet",
            StorageError::Query("relation does not exist".into()),
        );
        assert_eq!(err.to_string(), "Failed to save planet");

        let err = ApiError::Validation(ValidationError::MissingField("planetName"));
        assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);

        let err = ApiError::Validation(ValidationError::Degenerate("distance must not be zero".into()));
        assert!(err.to_string().contains("distance"));
    }
}
