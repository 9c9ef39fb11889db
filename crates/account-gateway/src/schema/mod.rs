//! Payload schemas
//!
//! Each event declares the shape of its payload; the dispatcher checks it
//! before the handler runs so handlers can rely on field types.

mod rules;
mod validate;

pub use rules::{FieldRule, NumberRule, Schema, StringFormat, StringRule};
pub use validate::validate;
