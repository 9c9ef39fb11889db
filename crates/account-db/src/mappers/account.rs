//! Account entity <-> model mapper

use account_core::entities::Account;
use account_core::value_objects::AccountId;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::AccountModel;

/// Convert AccountModel to Account entity
impl From<AccountModel> for Account {
    fn from(model: AccountModel) -> Self {
        Account {
            id: AccountId::from_uuid(model.id),
            username: model.username,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

/// Borrowed values for inserting an account row
pub struct AccountInsert<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> AccountInsert<'a> {
    pub fn new(account: &'a Account, password_hash: &'a str) -> Self {
        Self {
            id: account.id.into_inner(),
            username: &account.username,
            email: &account.email,
            password_hash,
            created_at: account.created_at,
        }
    }
}
