//! `isLoggedIn`: report the connection's login state

use async_trait::async_trait;

use super::error::HandlerResult;
use super::shared::single;
use crate::events::{EventContext, EventHandler, EventName, EventTemplate};
use crate::protocol::Payload;

pub struct IsLoggedInHandler;

#[async_trait]
impl EventHandler for IsLoggedInHandler {
    async fn handle(&self, ctx: &EventContext<'_>, _payload: Payload) -> HandlerResult<Payload> {
        Ok(single("loggedIn", ctx.is_logged_in()))
    }
}

pub fn template() -> EventTemplate {
    EventTemplate::new(EventName::IsLoggedIn, IsLoggedInHandler).points(5)
}
