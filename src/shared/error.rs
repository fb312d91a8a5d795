//! Application Error Types
//!
//! Centralized error handling with Axum integration.
//!
//! Status mapping follows the service's public contract: validation and
//! missing-entity failures are both `422 Unprocessable Entity`, storage
//! uniqueness violations are `409 Conflict`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Voting closed: {0}")]
    VoteClosed(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Machine-readable error category carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    AppError,
    DataNotFound,
    DataError,
    VoteClosed,
    ValidationError,
    BadRequest,
    Unauthorized,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub message: String,
}

impl AppError {
    /// Status code and error category for this error.
    pub fn classify(&self) -> (StatusCode, ErrorType) {
        match self {
            AppError::NotFound(_) => (StatusCode::UNPROCESSABLE_ENTITY, ErrorType::DataNotFound),
            AppError::Validation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorType::ValidationError)
            }
            AppError::Conflict(_) => (StatusCode::CONFLICT, ErrorType::DataError),
            AppError::VoteClosed(_) => (StatusCode::CONFLICT, ErrorType::VoteClosed),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorType::BadRequest),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, ErrorType::Unauthorized),
            AppError::Internal(_) | AppError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorType::AppError)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.classify();

        let message = match &self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Conflict(msg)
            | AppError::VoteClosed(msg)
            | AppError::Validation(msg) => msg.clone(),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".into()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Internal server error".into()
            }
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            error_type,
            message,
        };

        (status, Json(body)).into_response()
    }
}
