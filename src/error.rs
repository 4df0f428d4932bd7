//! Error types for Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed in API error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    DbFailure = 2,
    NoSuchRecord = 3,
    BookNotAvailable = 4,
    AlreadyReturned = 5,
    DuplicateUsername = 6,
    InvalidCredentials = 7,
    BadValue = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Book has no stock, or does not exist at all
    #[error("Book not available: {0}")]
    NotAvailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate return attempt on an already closed borrowing
    #[error("Already returned: {0}")]
    AlreadyReturned(String),

    #[error("Duplicate username: {0}")]
    DuplicateUsername(String),

    /// Deliberately undifferentiated: never reveals whether the
    /// username or the password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotAvailable(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BookNotAvailable, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchRecord, msg.clone())
            }
            AppError::AlreadyReturned(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::AlreadyReturned, msg.clone())
            }
            AppError::DuplicateUsername(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::DuplicateUsername, msg.clone())
            }
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidCredentials,
                "Invalid credentials".to_string(),
            ),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
