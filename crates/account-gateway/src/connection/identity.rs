//! Connection identity
//!
//! Maps each live connection to the account it is logged in as, plus the
//! reverse index used to reach every connection of one account. Lock order
//! is always `sessions` before `accounts`.

use account_core::AccountId;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::HashSet;

/// Identity state of one connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSession {
    pub connection_id: String,
    pub account_id: Option<AccountId>,
    pub connected_at: DateTime<Utc>,
}

impl ConnectionSession {
    fn new(connection_id: String) -> Self {
        Self {
            connection_id,
            account_id: None,
            connected_at: Utc::now(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.account_id.is_some()
    }
}

/// Login state of every live connection
#[derive(Debug, Default)]
pub struct IdentityStore {
    sessions: DashMap<String, ConnectionSession>,
    accounts: DashMap<AccountId, HashSet<String>>,
}

impl IdentityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a connection, logged out
    pub fn connect(&self, connection_id: &str) {
        self.sessions.insert(
            connection_id.to_string(),
            ConnectionSession::new(connection_id.to_string()),
        );
    }

    /// Stop tracking a connection, dropping its login
    pub fn disconnect(&self, connection_id: &str) -> Option<ConnectionSession> {
        let (_, session) = self.sessions.remove(connection_id)?;
        if let Some(account_id) = session.account_id {
            self.unlink(account_id, connection_id);
        }
        Some(session)
    }

    /// Log a connection in as `account_id`
    ///
    /// Returns `false` if the connection is no longer tracked, which
    /// happens when it closed while the login was being checked.
    pub fn login(&self, connection_id: &str, account_id: AccountId) -> bool {
        let Some(mut session) = self.sessions.get_mut(connection_id) else {
            return false;
        };

        if let Some(previous) = session.account_id.replace(account_id) {
            if previous != account_id {
                self.unlink(previous, connection_id);
            }
        }
        self.accounts
            .entry(account_id)
            .or_default()
            .insert(connection_id.to_string());

        tracing::debug!(
            connection_id = %connection_id,
            account_id = %account_id,
            "Connection logged in"
        );
        true
    }

    /// Log a connection out, returning the account it was logged in as
    pub fn logout(&self, connection_id: &str) -> Option<AccountId> {
        let mut session = self.sessions.get_mut(connection_id)?;
        let account_id = session.account_id.take()?;
        self.unlink(account_id, connection_id);

        tracing::debug!(
            connection_id = %connection_id,
            account_id = %account_id,
            "Connection logged out"
        );
        Some(account_id)
    }

    pub fn is_logged_in(&self, connection_id: &str) -> bool {
        self.account_id(connection_id).is_some()
    }

    pub fn account_id(&self, connection_id: &str) -> Option<AccountId> {
        self.sessions.get(connection_id)?.account_id
    }

    /// Every connection currently logged in as `account_id`
    pub fn connections_for(&self, account_id: AccountId) -> Vec<String> {
        self.accounts
            .get(&account_id)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of tracked connections
    pub fn connection_count(&self) -> usize {
        self.sessions.len()
    }

    fn unlink(&self, account_id: AccountId, connection_id: &str) {
        self.accounts.remove_if_mut(&account_id, |_, ids| {
            ids.remove(connection_id);
            ids.is_empty()
        });
    }
}
