//! # account-core
//!
//! Domain layer containing the client-facing error model, the account entity,
//! value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{email_domain, Account, DEFAULT_USERNAME_PREFIX};
pub use error::{generate_error, DomainError, ErrorKind, ErrorValue};
pub use traits::{AccountRepository, RepoResult};
pub use value_objects::{AccountId, AccountIdParseError};
