//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Lifts a storage failure into the domain, keeping the entity context for
/// missing rows.
pub(crate) fn from_repo(entity_type: &'static str, id: impl ToString, err: RepoError) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        RepoError::Constraint(msg) => DomainError::Validation(msg),
        RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Storage(msg),
    }
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "resource",
                id: "unknown".to_string(),
            },
            RepoError::Constraint(msg) => DomainError::Validation(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Storage(msg),
        }
    }
}
