//! Event templates
//!
//! A template pairs a handler with the checks the dispatcher runs before
//! calling it: point cost, login requirement, and payload schema.

use account_core::{ErrorKind, ErrorValue};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use super::context::EventContext;
use super::names::EventName;
use crate::handlers::HandlerResult;
use crate::protocol::Payload;
use crate::schema::Schema;

/// Points charged when a template does not set its own cost
pub const DEFAULT_POINTS: u32 = 5;

/// Serves one kind of event
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handle a payload that already passed the template's checks
    async fn handle(&self, ctx: &EventContext<'_>, payload: Payload) -> HandlerResult<Payload>;
}

/// Login state an event demands of its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthRequirement {
    #[default]
    Any,
    LoggedIn,
    LoggedOut,
}

impl AuthRequirement {
    /// Check the caller's login state against the requirement
    pub fn check(self, logged_in: bool) -> Result<(), ErrorValue> {
        match (self, logged_in) {
            (Self::LoggedIn, false) => Err(ErrorValue::new(ErrorKind::MustBeLoggedIn)),
            (Self::LoggedOut, true) => Err(ErrorValue::new(ErrorKind::MustBeLoggedOut)),
            _ => Ok(()),
        }
    }
}

/// Everything the dispatcher knows about one event
#[derive(Clone)]
pub struct EventTemplate {
    name: EventName,
    handler: Arc<dyn EventHandler>,
    required: Vec<&'static str>,
    points: u32,
    auth: AuthRequirement,
    schema: Schema,
}

impl EventTemplate {
    pub fn new(name: EventName, handler: impl EventHandler + 'static) -> Self {
        Self {
            name,
            handler: Arc::new(handler),
            required: Vec::new(),
            points: DEFAULT_POINTS,
            auth: AuthRequirement::Any,
            schema: Schema::new(),
        }
    }

    /// Fields that must be present in the payload
    pub fn required(mut self, fields: &[&'static str]) -> Self {
        self.required = fields.to_vec();
        self
    }

    pub fn points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn logged_in(mut self) -> Self {
        self.auth = AuthRequirement::LoggedIn;
        self
    }

    pub fn logged_out(mut self) -> Self {
        self.auth = AuthRequirement::LoggedOut;
        self
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn name(&self) -> EventName {
        self.name
    }

    pub fn handler(&self) -> &dyn EventHandler {
        self.handler.as_ref()
    }

    pub fn required_fields(&self) -> &[&'static str] {
        &self.required
    }

    pub fn cost(&self) -> u32 {
        self.points
    }

    pub fn auth(&self) -> AuthRequirement {
        self.auth
    }

    pub fn payload_schema(&self) -> &Schema {
        &self.schema
    }
}

impl fmt::Debug for EventTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTemplate")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("points", &self.points)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}
