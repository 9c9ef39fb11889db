//! Event error model - the only failure shape a client ever receives

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of error kinds returned to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Unknown,
    MustBeLoggedIn,
    MustBeLoggedOut,
    MissingArguments,
    Ratelimited,
    Required,
    RequiredEmail,
    RequiredUuid,
    Length,
    ExactLength,
    InvalidPassword,
    AccountAlreadyExists,
    AccountDoesntExist,
    InvalidRegex,
    InvalidToken,
    ProfileNotFound,
}

impl ErrorKind {
    /// Wire name of the kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::MustBeLoggedIn => "MUST_BE_LOGGED_IN",
            Self::MustBeLoggedOut => "MUST_BE_LOGGED_OUT",
            Self::MissingArguments => "MISSING_ARGUMENTS",
            Self::Ratelimited => "RATELIMITED",
            Self::Required => "REQUIRED",
            Self::RequiredEmail => "REQUIRED_EMAIL",
            Self::RequiredUuid => "REQUIRED_UUID",
            Self::Length => "LENGTH",
            Self::ExactLength => "EXACT_LENGTH",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::AccountAlreadyExists => "ACCOUNT_ALREADY_EXISTS",
            Self::AccountDoesntExist => "ACCOUNT_DOESNT_EXIST",
            Self::InvalidRegex => "INVALID_REGEX",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
        }
    }

    /// Message used when no detail is supplied
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Unknown => "An unknown error occurred",
            Self::MustBeLoggedIn => "You must be logged in to perform this action",
            Self::MustBeLoggedOut => "You must be logged out to perform this action",
            Self::MissingArguments => "Required arguments are missing",
            Self::Ratelimited => "Too many requests, try again shortly",
            Self::Required => "A required field is empty",
            Self::RequiredEmail => "A valid email address is required",
            Self::RequiredUuid => "A valid UUID is required",
            Self::Length => "A field has an invalid length",
            Self::ExactLength => "A field does not have the required length",
            Self::InvalidPassword => "The password is incorrect",
            Self::AccountAlreadyExists => "An account with this email already exists",
            Self::AccountDoesntExist => "No account is registered with this email",
            Self::InvalidRegex => "A field does not match the required format",
            Self::InvalidToken => "The token is invalid or has expired",
            Self::ProfileNotFound => "The requested profile was not found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged error value delivered to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorValue {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorValue {
    /// Shorthand for `generate_error(kind, None)`
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        generate_error(kind, None)
    }

    /// Catch-all for failures nobody classified
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(ErrorKind::Unknown)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ErrorValue {}

impl From<ErrorKind> for ErrorValue {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Build an [`ErrorValue`], falling back to the kind's default message
pub fn generate_error(kind: ErrorKind, detail: Option<&str>) -> ErrorValue {
    let message = match detail {
        Some(detail) if !detail.is_empty() => detail.to_string(),
        _ => kind.default_message().to_string(),
    };

    ErrorValue { kind, message }
}
