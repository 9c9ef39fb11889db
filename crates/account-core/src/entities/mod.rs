//! Domain entities - core business objects

mod account;

pub use account::{email_domain, Account, DEFAULT_USERNAME_PREFIX};
