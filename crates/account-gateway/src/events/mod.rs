//! Gateway events
//!
//! Event names, their templates, the registry holding them, and the
//! dispatcher that runs inbound events through their checks.

mod context;
mod dispatcher;
mod names;
mod registry;
mod template;

pub use context::{DispatchContext, EventContext};
pub use dispatcher::Dispatcher;
pub use names::{EventName, ServerEvent};
pub use registry::{EventRegistry, RegistryBuilder, RegistryError};
pub use template::{AuthRequirement, EventHandler, EventTemplate, DEFAULT_POINTS};
