//! Integration test utilities for the account gateway
//!
//! This crate provides helpers for running end-to-end tests against
//! a gateway served on a local port.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
