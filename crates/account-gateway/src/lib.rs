//! # account-gateway
//!
//! WebSocket gateway serving account events: registration, login, and
//! profile lookups, each guarded by login state, payload schema, and a
//! per-connection point budget.

pub mod connection;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod ratelimit;
pub mod schema;
pub mod server;

#[cfg(test)]
mod test_support;

pub use events::{DispatchContext, Dispatcher, EventName, EventRegistry};
pub use server::{create_app, create_gateway_state, run, serve, GatewayState};
