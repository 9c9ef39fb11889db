//! In-memory implementation of AccountRepository
//!
//! Used when no database is configured (local mode) and throughout the tests.
//! Data lives for the lifetime of the process.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use account_core::entities::Account;
use account_core::error::DomainError;
use account_core::traits::{AccountRepository, RepoResult};
use account_core::value_objects::AccountId;

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    password_hash: String,
}

/// DashMap-backed account store
#[derive(Debug, Default)]
pub struct MemoryAccountRepository {
    accounts: DashMap<AccountId, StoredAccount>,
    /// Email -> account index, the uniqueness guard
    emails: DashMap<String, AccountId>,
}

impl MemoryAccountRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>> {
        Ok(self.accounts.get(&id).map(|stored| stored.account.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let Some(id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.emails.contains_key(email))
    }

    async fn count(&self) -> RepoResult<u64> {
        Ok(self.accounts.len() as u64)
    }

    async fn create(&self, account: &Account, password_hash: &str) -> RepoResult<()> {
        // The entry guard holds the email's shard lock until the account is stored
        match self.emails.entry(account.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::EmailAlreadyExists),
            Entry::Vacant(slot) => {
                self.accounts.insert(
                    account.id,
                    StoredAccount {
                        account: account.clone(),
                        password_hash: password_hash.to_string(),
                    },
                );
                slot.insert(account.id);
                debug!(account_id = %account.id, "Account stored in memory");
                Ok(())
            }
        }
    }

    async fn get_password_hash(&self, id: AccountId) -> RepoResult<Option<String>> {
        Ok(self
            .accounts
            .get(&id)
            .map(|stored| stored.password_hash.clone()))
    }
}
