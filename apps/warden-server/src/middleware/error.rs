//! Error handling - every failure becomes a `{data: {}, message}` envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use warden_core::DomainError;
use warden_core::error::RepoError;
use warden_core::ports::AuthError;
use warden_shared::{ErrorResponse, ValidationFailure};

/// Application-level error type rendered as a failure envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request could not be parsed into the expected shape.
    #[error("{0}")]
    Bind(String),

    /// The request parsed but broke a declared constraint.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotImplemented(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message shown to the client. Infrastructure details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Storage(_) => "storage is unavailable, please try again later".to_string(),
            AppError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Bind(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Storage(detail) => tracing::error!("Storage error: {}", detail),
            AppError::Internal(detail) => tracing::error!("Internal error: {}", detail),
            other => tracing::debug!(status = %self.status_code(), "Request failed: {}", other),
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse::failure(self.public_message()))
    }
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        AppError::Validation(failure.message)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Unauthorized => AppError::Unauthorized("unauthorized".to_string()),
            DomainError::Storage(msg) => AppError::Storage(msg),
            DomainError::NotImplemented(_) => AppError::NotImplemented(err.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        DomainError::from(err).into()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::HashingError(msg) => AppError::Internal(msg),
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
