//! Domain-level error types.

use thiserror::Error;

use crate::ports::AuthError;

/// Domain errors - the closed set surfaced to the HTTP boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// Store transport or driver failure. The message is for logs only.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Convert a repository error for an ownership-scoped row, turning
    /// [`RepoError::NotFound`] into a typed not-found.
    pub fn scoped(err: RepoError, entity_type: &'static str, id: i32) -> Self {
        match err {
            RepoError::NotFound => DomainError::NotFound { entity_type, id },
            other => other.into(),
        }
    }

    /// Convert a repository error from an insert that links to a parent row.
    /// A constraint failure there means the parent is gone.
    pub fn missing_parent(err: RepoError, entity_type: &'static str, id: i32) -> Self {
        match err {
            RepoError::Constraint(detail) => {
                tracing::debug!(entity_type, id, %detail, "Parent row missing on insert");
                DomainError::NotFound { entity_type, id }
            }
            other => other.into(),
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

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(detail) => {
                tracing::warn!(%detail, "Constraint violation");
                DomainError::Conflict("request conflicts with existing data".to_string())
            }
            RepoError::NotFound => DomainError::Store("affected row disappeared".to_string()),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Store(msg),
        }
    }
}
