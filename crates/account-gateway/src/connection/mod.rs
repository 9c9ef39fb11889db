//! Connection management
//!
//! Tracks live WebSocket connections, their outbound channels, and which
//! account (if any) each one is logged in as.

mod connection;
mod identity;
mod manager;

pub use connection::{Connection, InFlightEvent};
pub use identity::{ConnectionSession, IdentityStore};
pub use manager::ConnectionManager;

/// Opaque per-connection identifier, unique for the process lifetime
pub fn generate_connection_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
