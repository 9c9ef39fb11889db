//! Shared fixtures for unit tests

use account_common::AppConfig;
use account_db::MemoryAccountRepository;
use serde_json::Value;
use std::sync::Arc;

use crate::events::DispatchContext;
use crate::protocol::Payload;

/// Test-mode configuration with no environment behind it
pub fn test_config() -> AppConfig {
    test_config_with(&[])
}

/// Test-mode configuration with a few variables set
pub fn test_config_with(vars: &[(&str, &str)]) -> AppConfig {
    AppConfig::from_lookup(|name| {
        if let Some((_, value)) = vars.iter().find(|(key, _)| *key == name) {
            return Some((*value).to_string());
        }
        match name {
            "TEST_MODE" | "SILENT_LOGGING" => Some("true".to_string()),
            _ => None,
        }
    })
    .unwrap()
}

/// Services backed by an in-memory account store
pub fn test_context() -> DispatchContext {
    DispatchContext::new(
        Arc::new(test_config()),
        Arc::new(MemoryAccountRepository::new()),
    )
}

pub fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
