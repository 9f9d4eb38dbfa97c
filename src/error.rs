//! Error types for the asset tracker server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::lifecycle::LifecycleError;

/// Application error codes returned in every error payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NotFound = 4,
    ValidationError = 5,
    DuplicateKey = 6,
    InvalidDateOrder = 7,
    FutureDate = 8,
    AssetInUse = 9,
    EmployeeHasAssignedAssets = 10,
    AssetNotServiceable = 11,
    AssetAlreadyAssigned = 12,
    AssignmentOpen = 13,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    /// Status code, error code and client-facing message
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, msg.clone())
            }
            AppError::Database(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::warn!(
                    constraint = db_err.constraint().unwrap_or("unknown"),
                    "Unique constraint violation"
                );
                (
                    StatusCode::CONFLICT,
                    ErrorCode::DuplicateKey,
                    format!(
                        "Duplicate value violates unique constraint: {}",
                        db_err.constraint().unwrap_or("unknown")
                    ),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Failure, msg.clone()),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::Lifecycle(e) => {
                let (status, code) = match e {
                    LifecycleError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
                    LifecycleError::DuplicateKey { .. } => (StatusCode::CONFLICT, ErrorCode::DuplicateKey),
                    LifecycleError::InvalidDateOrder(_) => {
                        (StatusCode::BAD_REQUEST, ErrorCode::InvalidDateOrder)
                    }
                    LifecycleError::FutureDate(_) => (StatusCode::BAD_REQUEST, ErrorCode::FutureDate),
                    LifecycleError::NotFound { .. } => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
                    LifecycleError::AssetInUse(_) => (StatusCode::CONFLICT, ErrorCode::AssetInUse),
                    LifecycleError::EmployeeHasAssignedAssets(_) => {
                        (StatusCode::CONFLICT, ErrorCode::EmployeeHasAssignedAssets)
                    }
                    LifecycleError::AssetNotServiceable { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::AssetNotServiceable)
                    }
                    LifecycleError::AssetAlreadyAssigned(_) => {
                        (StatusCode::CONFLICT, ErrorCode::AssetAlreadyAssigned)
                    }
                    LifecycleError::AssignmentOpen(_) => (StatusCode::CONFLICT, ErrorCode::AssignmentOpen),
                };
                (status, code, e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

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
