//! `logout`: drop the connection's login

use async_trait::async_trait;

use super::error::HandlerResult;
use crate::events::{EventContext, EventHandler, EventName, EventTemplate};
use crate::protocol::Payload;

pub struct LogoutHandler;

#[async_trait]
impl EventHandler for LogoutHandler {
    async fn handle(&self, ctx: &EventContext<'_>, _payload: Payload) -> HandlerResult<Payload> {
        if let Some(account_id) = ctx.logout() {
            tracing::debug!(
                connection_id = %ctx.connection_id(),
                account_id = %account_id,
                "Logged out"
            );
        }

        Ok(Payload::new())
    }
}

pub fn template() -> EventTemplate {
    EventTemplate::new(EventName::Logout, LogoutHandler)
        .points(5)
        .logged_in()
}
