//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::Account;
use crate::error::DomainError;
use crate::value_objects::AccountId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Account Repository
// ============================================================================

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>>;

    /// Find account by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Number of registered accounts
    async fn count(&self) -> RepoResult<u64>;

    /// Create a new account
    ///
    /// Fails with [`DomainError::EmailAlreadyExists`] when the email is taken,
    /// even if a concurrent registration won the race after `email_exists`.
    async fn create(&self, account: &Account, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: AccountId) -> RepoResult<Option<String>>;
}
