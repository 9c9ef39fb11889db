//! Domain errors - error types for the domain layer

use thiserror::Error;

use super::event_error::ErrorKind;
use crate::value_objects::AccountId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Error kind reported to the client for this failure
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            Self::AccountNotFound(_) => ErrorKind::ProfileNotFound,
            Self::EmailAlreadyExists => ErrorKind::AccountAlreadyExists,
            Self::DatabaseError(_) | Self::InternalError(_) => ErrorKind::Unknown,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            DomainError::EmailAlreadyExists.error_kind(),
            ErrorKind::AccountAlreadyExists
        );
        assert_eq!(
            DomainError::AccountNotFound(AccountId::new()).error_kind(),
            ErrorKind::ProfileNotFound
        );
        assert_eq!(
            DomainError::DatabaseError("connection reset".to_string()).error_kind(),
            ErrorKind::Unknown
        );
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::AccountNotFound(AccountId::new()).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
        assert!(DomainError::EmailAlreadyExists.is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::DatabaseError("timeout".to_string());
        assert_eq!(err.to_string(), "Database error: timeout");
    }
}
