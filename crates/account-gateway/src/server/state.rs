//! Gateway state
//!
//! Application state for the gateway server.

use crate::connection::{ConnectionManager, IdentityStore};
use crate::events::{DispatchContext, Dispatcher};
use account_common::AppConfig;
use std::sync::Arc;

/// Gateway application state
///
/// Cheap to clone; every socket task holds one.
#[derive(Clone)]
pub struct GatewayState {
    /// Event dispatcher with its shared services
    dispatcher: Arc<Dispatcher>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn context(&self) -> &DispatchContext {
        self.dispatcher.context()
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &ConnectionManager {
        self.context().connections()
    }

    pub fn identity(&self) -> &IdentityStore {
        self.context().identity()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        self.context().config()
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connection_manager", self.connection_manager())
            .field("config", &"AppConfig")
            .finish()
    }
}
