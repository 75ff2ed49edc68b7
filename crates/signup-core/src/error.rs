//! Domain-level error types.

use thiserror::Error;

use crate::ports::StorageError;

/// Domain errors - failures of the signup pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Client-correctable input. The message is safe to show to callers.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
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

    #[error("Credential hashing failed: {0}")]
    Hashing(String),

    #[error("Store call exceeded its deadline of {0:?}")]
    Timeout(std::time::Duration),
}

impl RepoError {
    /// A deadline expiry leaves the store call's outcome unknown: the write
    /// may still have been applied.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, RepoError::Timeout(_))
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::Storage(err.to_string())
    }
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "User",
                id: String::new(),
            },
            RepoError::Hashing(msg) => DomainError::Hashing(msg),
            other => DomainError::Persistence(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn invalid_input_displays_bare_message() {
        let err = DomainError::invalid("name is required");
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn repo_errors_fold_into_domain_taxonomy() {
        assert!(matches!(
            DomainError::from(RepoError::NotFound),
            DomainError::NotFound { .. }
        ));
        assert_eq!(
            DomainError::from(RepoError::Hashing("bad params".into())),
            DomainError::Hashing("bad params".into())
        );
        assert!(matches!(
            DomainError::from(RepoError::Timeout(Duration::from_secs(5))),
            DomainError::Persistence(_)
        ));
    }

    #[test]
    fn only_timeouts_are_indeterminate() {
        assert!(RepoError::Timeout(Duration::from_millis(50)).is_indeterminate());
        assert!(!RepoError::Query("syntax".into()).is_indeterminate());
        assert!(!RepoError::Constraint("users_pkey".into()).is_indeterminate());
        assert!(!RepoError::Connection("refused".into()).is_indeterminate());
        assert!(!RepoError::Hashing("params".into()).is_indeterminate());
    }

    #[test]
    fn storage_errors_become_storage_failures() {
        let err = StorageError::Write {
            path: "uploads/images/a.png".into(),
            source: std::io::Error::other("disk full"),
        };
        assert!(matches!(DomainError::from(err), DomainError::Storage(msg) if msg.contains("disk full")));
    }
}
