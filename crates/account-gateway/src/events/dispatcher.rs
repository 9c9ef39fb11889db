//! Event dispatcher
//!
//! Runs one inbound event through lookup, rate limiting, the login gate,
//! and schema validation before handing it to its handler. Any failure
//! along the way becomes an [`ErrorValue`] for the caller.

use account_core::{ErrorKind, ErrorValue};
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::context::{DispatchContext, EventContext};
use super::names::EventName;
use super::registry::EventRegistry;
use super::template::{EventTemplate, DEFAULT_POINTS};
use crate::protocol::{Payload, ServerFrame};
use crate::ratelimit::AuthState;
use crate::schema;

/// Routes events to their handlers
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<EventRegistry>,
    context: DispatchContext,
}

impl Dispatcher {
    pub fn new(registry: EventRegistry, context: DispatchContext) -> Self {
        Self {
            registry: Arc::new(registry),
            context,
        }
    }

    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    pub fn context(&self) -> &DispatchContext {
        &self.context
    }

    /// Serve one event, returning the reply if the client asked for one
    pub async fn dispatch(
        &self,
        connection_id: &str,
        event: &str,
        payload: Payload,
        ack: Option<u64>,
    ) -> Option<ServerFrame> {
        let result = self.execute(connection_id, event, payload).await;

        if ack.is_none() {
            if let Err(err) = &result {
                tracing::trace!(
                    connection_id = %connection_id,
                    event = %event,
                    kind = %err.kind,
                    "Dropping error for event without ack"
                );
            }
        }

        ack.map(|ack| ServerFrame::reply(ack, result))
    }

    /// Run an event through every check and its handler
    pub async fn execute(
        &self,
        connection_id: &str,
        event: &str,
        payload: Payload,
    ) -> Result<Payload, ErrorValue> {
        let template = self.registry.lookup(event);

        // Login state is read once so the budget and the gate agree
        let logged_in = self.context.identity().is_logged_in(connection_id);

        // Unknown events are charged too, so they cannot flood the log
        let cost = template.map_or(DEFAULT_POINTS, EventTemplate::cost);
        let charge = self.context.limiters().charge(
            AuthState::from_logged_in(logged_in),
            connection_id,
            cost,
        );
        if !charge.ok {
            tracing::debug!(
                connection_id = %connection_id,
                event = %event,
                remaining = charge.remaining,
                "Event rate limited"
            );
            return Err(ErrorValue::new(ErrorKind::Ratelimited));
        }

        let Some(template) = template else {
            tracing::warn!(connection_id = %connection_id, event = %event, "Unknown event");
            return Err(ErrorValue::new(ErrorKind::Unknown));
        };
        let name = template.name();

        template.auth().check(logged_in)?;
        schema::validate(&payload, template.required_fields(), template.payload_schema())?;

        let ctx = EventContext::new(connection_id, &self.context);
        let started = Instant::now();
        let outcome = AssertUnwindSafe(template.handler().handle(&ctx, payload))
            .catch_unwind()
            .await;
        self.report_duration(connection_id, name, started.elapsed());

        match outcome {
            Ok(Ok(data)) => Ok(data),
            Ok(Err(err)) => {
                if err.is_internal() {
                    tracing::error!(
                        connection_id = %connection_id,
                        event = %name,
                        error = %err,
                        "Handler failed"
                    );
                } else {
                    tracing::debug!(
                        connection_id = %connection_id,
                        event = %name,
                        error = %err,
                        "Event rejected"
                    );
                }
                Err(err.to_error_value())
            }
            Err(_) => {
                tracing::error!(connection_id = %connection_id, event = %name, "Handler panicked");
                Err(ErrorValue::unknown())
            }
        }
    }

    fn report_duration(&self, connection_id: &str, event: EventName, elapsed: Duration) {
        let performance = &self.context.config().performance;
        let elapsed_ms = elapsed.as_millis();

        if performance.reports_enabled && elapsed_ms > u128::from(performance.min_ms) {
            tracing::warn!(
                connection_id = %connection_id,
                event = %event,
                elapsed_ms = elapsed_ms as u64,
                "Slow event"
            );
        }
    }
}
