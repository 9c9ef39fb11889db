//! Handler error types

use account_common::AppError;
use account_core::{DomainError, ErrorKind, ErrorValue};
use thiserror::Error;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Request refused for a reason the caller can act on
    #[error("Rejected: {0}")]
    Rejected(ErrorValue),

    /// Domain error (from repositories)
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Application error (tokens, hashing)
    #[error("Application error: {0}")]
    App(#[from] AppError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Refuse the request with a specific error kind
    pub fn rejected(kind: ErrorKind) -> Self {
        Self::Rejected(ErrorValue::new(kind))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the failure is ours rather than the caller's
    pub fn is_internal(&self) -> bool {
        match self {
            Self::Rejected(_) => false,
            Self::Domain(e) => e.error_kind() == ErrorKind::Unknown,
            Self::App(e) => e.is_server_error(),
            Self::Internal(_) => true,
        }
    }

    /// Error delivered to the client; internal details are never exposed
    pub fn to_error_value(&self) -> ErrorValue {
        match self {
            Self::Rejected(value) => value.clone(),
            Self::Domain(e) => ErrorValue::new(e.error_kind()),
            Self::App(e) => ErrorValue::from(e),
            Self::Internal(_) => ErrorValue::unknown(),
        }
    }
}

impl From<ErrorKind> for HandlerError {
    fn from(kind: ErrorKind) -> Self {
        Self::rejected(kind)
    }
}

impl From<ErrorValue> for HandlerError {
    fn from(value: ErrorValue) -> Self {
        Self::Rejected(value)
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
