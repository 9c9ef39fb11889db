//! Application error types
//!
//! Unified error handling for the entire application.

use account_core::{DomainError, ErrorKind, ErrorValue};
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Startup / listener errors
    #[error("Server error: {0}")]
    Server(String),
}

impl AppError {
    /// Error kind reported to a client for this failure
    #[must_use]
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            Self::InvalidToken | Self::TokenExpired => ErrorKind::InvalidToken,
            Self::Domain(e) => e.error_kind(),
            Self::Database(_) | Self::Internal(_) | Self::Config(_) | Self::Server(_) => {
                ErrorKind::Unknown
            }
        }
    }

    /// Whether the failure is ours rather than the caller's
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.error_kind() == ErrorKind::Unknown
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(msg: impl fmt::Display) -> Self {
        Self::Config(msg.to_string())
    }
}

impl From<&AppError> for ErrorValue {
    fn from(err: &AppError) -> Self {
        // Internal details never reach the client
        ErrorValue::new(err.error_kind())
    }
}

impl From<AppError> for ErrorValue {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
