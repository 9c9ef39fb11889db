//! Error types - the client-facing error model and domain errors

mod domain_error;
mod event_error;

pub use domain_error::DomainError;
pub use event_error::{generate_error, ErrorKind, ErrorValue};
