//! Handler context
//!
//! [`DispatchContext`] holds the process-wide services every event needs.
//! [`EventContext`] is the per-request view a handler receives: the shared
//! services plus the id of the connection that sent the event.

use account_common::{credential_hasher, AppConfig, CredentialHasher, JwtService};
use account_core::{AccountId, AccountRepository};
use std::sync::Arc;

use super::names::ServerEvent;
use crate::connection::{ConnectionManager, IdentityStore};
use crate::protocol::{Payload, ServerFrame};
use crate::ratelimit::RateLimiters;

/// Services shared by every connection
#[derive(Clone)]
pub struct DispatchContext {
    identity: Arc<IdentityStore>,
    limiters: Arc<RateLimiters>,
    connections: Arc<ConnectionManager>,
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: JwtService,
    config: Arc<AppConfig>,
}

impl DispatchContext {
    /// Wire up the services for a configuration
    ///
    /// Test mode turns rate limiting off and stores passwords unhashed.
    pub fn new(config: Arc<AppConfig>, accounts: Arc<dyn AccountRepository>) -> Self {
        let test_mode = config.app.test_mode;
        Self {
            identity: Arc::new(IdentityStore::new()),
            limiters: Arc::new(RateLimiters::new(&config.rate_limit, !test_mode)),
            connections: ConnectionManager::new_shared(),
            accounts,
            hasher: credential_hasher(test_mode),
            tokens: JwtService::new(&config.jwt.secret, config.jwt.expiry),
            config,
        }
    }

    /// Replace the rate limiters
    pub fn with_limiters(mut self, limiters: Arc<RateLimiters>) -> Self {
        self.limiters = limiters;
        self
    }

    pub fn identity(&self) -> &IdentityStore {
        &self.identity
    }

    pub fn limiters(&self) -> &Arc<RateLimiters> {
        &self.limiters
    }

    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }

    pub fn accounts(&self) -> &dyn AccountRepository {
        self.accounts.as_ref()
    }

    pub fn hasher(&self) -> &dyn CredentialHasher {
        self.hasher.as_ref()
    }

    pub fn tokens(&self) -> &JwtService {
        &self.tokens
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for DispatchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchContext")
            .field("identity", &self.identity)
            .field("connections", &self.connections)
            .field("test_mode", &self.config.app.test_mode)
            .finish_non_exhaustive()
    }
}

/// What a handler sees while serving one event
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    connection_id: &'a str,
    shared: &'a DispatchContext,
}

impl<'a> EventContext<'a> {
    pub fn new(connection_id: &'a str, shared: &'a DispatchContext) -> Self {
        Self {
            connection_id,
            shared,
        }
    }

    pub fn connection_id(&self) -> &'a str {
        self.connection_id
    }

    pub fn shared(&self) -> &'a DispatchContext {
        self.shared
    }

    pub fn accounts(&self) -> &'a dyn AccountRepository {
        self.shared.accounts()
    }

    pub fn hasher(&self) -> &'a dyn CredentialHasher {
        self.shared.hasher()
    }

    pub fn tokens(&self) -> &'a JwtService {
        self.shared.tokens()
    }

    pub fn config(&self) -> &'a AppConfig {
        self.shared.config()
    }

    /// Account this connection is logged in as
    pub fn account_id(&self) -> Option<AccountId> {
        self.shared.identity().account_id(self.connection_id)
    }

    pub fn is_logged_in(&self) -> bool {
        self.shared.identity().is_logged_in(self.connection_id)
    }

    /// Log this connection in; `false` means it has already closed
    pub fn login(&self, account_id: AccountId) -> bool {
        self.shared.identity().login(self.connection_id, account_id)
    }

    pub fn logout(&self) -> Option<AccountId> {
        self.shared.identity().logout(self.connection_id)
    }

    /// Push an event to the account's other connections
    pub fn notify_account(&self, account_id: AccountId, event: ServerEvent, data: Payload) -> usize {
        let targets = self.shared.identity().connections_for(account_id);
        let frame = ServerFrame::push(event.as_str(), data);

        self.shared.connections().send_to(
            targets
                .iter()
                .map(String::as_str)
                .filter(|id| *id != self.connection_id),
            &frame,
        )
    }
}
