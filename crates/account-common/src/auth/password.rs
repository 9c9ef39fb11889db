//! Password hashing and verification utilities
//!
//! Uses Argon2id for secure password hashing (OWASP recommended).
//! Test mode swaps in [`PlainHasher`], which stores passwords as given.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// One-way credential hashing used by the account handlers
pub trait CredentialHasher: Send + Sync + std::fmt::Debug {
    /// Hash a password for storage
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Check a password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if the hash is not a valid PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Argon2id hasher used in normal operation
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_password(password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        verify_password(password, hash)
    }
}

/// Identity "hasher" for test mode
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        Ok(password.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        Ok(password == hash)
    }
}

/// Pick the hasher for the current mode
#[must_use]
pub fn credential_hasher(test_mode: bool) -> Arc<dyn CredentialHasher> {
    if test_mode {
        Arc::new(PlainHasher)
    } else {
        Arc::new(Argon2Hasher)
    }
}
