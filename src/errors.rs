//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ACTIVE_LEASE_OVERLAP_CONSTRAINT;

/// Message returned when a lease would overlap another active lease on the same unit.
pub const OVERLAPPING_LEASE_MESSAGE: &str =
    "Unit has an overlapping active lease for the specified period";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Not authenticated")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing rows and rows owned by someone else are reported identically.
    #[error("{0} not found or unauthorized")]
    NotFoundOrUnauthorized(&'static str),

    // Resource errors
    #[error("{0}")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFoundOrUnauthorized(_) => "NOT_FOUND_OR_UNAUTHORIZED",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFoundOrUnauthorized(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("Session token rejected: {:?}", e);
                "Invalid or expired session".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        // The exclusion constraint is the storage-level backstop for the overlap check.
        if err.to_string().contains(ACTIVE_LEASE_OVERLAP_CONSTRAINT) {
            return AppError::Conflict(OVERLAPPING_LEASE_MESSAGE.to_string());
        }
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    /// Treat a missing row as "not found or unauthorized" for the named entity.
    fn ok_or_not_owned(self, entity: &'static str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_owned(self, entity: &'static str) -> AppResult<T> {
        self.ok_or(AppError::NotFoundOrUnauthorized(entity))
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn overlapping_lease() -> Self {
        AppError::Conflict(OVERLAPPING_LEASE_MESSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_owned_message_is_generic() {
        let err: AppResult<()> = None.ok_or_not_owned("Unit");
        let err = err.unwrap_err();
        assert_eq!(err.to_string(), "Unit not found or unauthorized");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_exclusion_violation_maps_to_overlap_conflict() {
        let db_err = sea_orm::DbErr::Custom(format!(
            "conflicting key value violates exclusion constraint \"{}\"",
            ACTIVE_LEASE_OVERLAP_CONSTRAINT
        ));
        let err = AppError::from(db_err);
        assert!(matches!(err, AppError::Conflict(ref msg) if msg == OVERLAPPING_LEASE_MESSAGE));
    }

    #[test]
    fn test_database_error_hides_details() {
        let err = AppError::from(sea_orm::DbErr::Custom("relation \"x\" missing".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "A database error occurred");
    }
}
