//! `fetchProfileId`: the caller's own account id

use account_core::ErrorKind;
use async_trait::async_trait;

use super::error::{HandlerError, HandlerResult};
use super::shared::single;
use crate::events::{EventContext, EventHandler, EventName, EventTemplate};
use crate::protocol::Payload;

pub struct FetchProfileIdHandler;

#[async_trait]
impl EventHandler for FetchProfileIdHandler {
    async fn handle(&self, ctx: &EventContext<'_>, _payload: Payload) -> HandlerResult<Payload> {
        // The gate already checked, but the connection may log out concurrently
        let account_id = ctx
            .account_id()
            .ok_or_else(|| HandlerError::rejected(ErrorKind::MustBeLoggedIn))?;

        Ok(single("profileId", account_id.to_string()))
    }
}

pub fn template() -> EventTemplate {
    EventTemplate::new(EventName::FetchProfileId, FetchProfileIdHandler)
        .points(5)
        .logged_in()
}
