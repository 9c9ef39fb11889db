//! Pieces shared by several handlers

use account_core::ErrorKind;
use serde_json::Value;

use super::error::{HandlerError, HandlerResult};
use crate::protocol::Payload;
use crate::schema::{Schema, StringRule};

/// Email and password rules used by both register and login
pub fn account_schema() -> Schema {
    Schema::new()
        .field("email", StringRule::new().required().length(6, 120).email())
        .field("password", StringRule::new().required().length(8, 90))
}

/// Read a string field the schema has already vetted
pub fn str_field<'p>(payload: &'p Payload, name: &str) -> HandlerResult<&'p str> {
    payload
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::rejected(ErrorKind::MissingArguments))
}

pub fn single(key: &str, value: impl Into<Value>) -> Payload {
    let mut payload = Payload::new();
    payload.insert(key.to_string(), value.into());
    payload
}
