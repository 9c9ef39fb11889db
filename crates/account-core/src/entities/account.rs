//! Account entity - a registered account

use chrono::{DateTime, Utc};

use crate::value_objects::AccountId;

/// Prefix of generated usernames
pub const DEFAULT_USERNAME_PREFIX: &str = "Account";

/// Account entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new Account with a fresh ID
    pub fn new(username: String, email: String) -> Self {
        Self {
            id: AccountId::new(),
            username,
            email,
            created_at: Utc::now(),
        }
    }

    /// Username handed out to the `ordinal`-th registered account
    pub fn default_username(ordinal: u64) -> String {
        format!("{DEFAULT_USERNAME_PREFIX} {ordinal}")
    }

    /// Domain part of the account's email
    pub fn email_domain(&self) -> Option<&str> {
        email_domain(&self.email)
    }
}

/// Domain part of an email address, if it has one
pub fn email_domain(email: &str) -> Option<&str> {
    email
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
}
