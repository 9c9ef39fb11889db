//! Test fixtures and data generators

use serde_json::{json, Value};

/// Password accepted by the account schema
pub const TEST_PASSWORD: &str = "TestPass123!";

/// Credentials for one test account
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Credentials with an email no other test uses
    pub fn unique() -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self {
            email: format!("test{}@example.com", &suffix[..12]),
            password: TEST_PASSWORD.to_string(),
        }
    }

    pub fn with_password(&self, password: &str) -> Self {
        Self {
            email: self.email.clone(),
            password: password.to_string(),
        }
    }

    /// Payload for `register` and `login`
    pub fn payload(&self) -> Value {
        json!({ "email": self.email, "password": self.password })
    }
}
