//! `login`: authenticate with email and password

use account_core::ErrorKind;
use async_trait::async_trait;

use super::error::{HandlerError, HandlerResult};
use super::shared::{account_schema, single, str_field};
use crate::events::{EventContext, EventHandler, EventName, EventTemplate, ServerEvent};
use crate::protocol::Payload;

pub struct LoginHandler;

#[async_trait]
impl EventHandler for LoginHandler {
    async fn handle(&self, ctx: &EventContext<'_>, payload: Payload) -> HandlerResult<Payload> {
        let email = str_field(&payload, "email")?;
        let password = str_field(&payload, "password")?;

        let accounts = ctx.accounts();
        let account = accounts
            .find_by_email(email)
            .await?
            .ok_or_else(|| HandlerError::rejected(ErrorKind::AccountDoesntExist))?;
        let stored_hash = accounts
            .get_password_hash(account.id)
            .await?
            .ok_or_else(|| HandlerError::rejected(ErrorKind::AccountDoesntExist))?;

        if !ctx.hasher().verify(password, &stored_hash)? {
            return Err(HandlerError::rejected(ErrorKind::InvalidPassword));
        }

        if ctx.login(account.id) {
            let notified = ctx.notify_account(account.id, ServerEvent::NewLogin, Payload::new());
            tracing::debug!(
                connection_id = %ctx.connection_id(),
                account_id = %account.id,
                notified,
                "Logged in with password"
            );
        }

        Ok(single("token", ctx.tokens().issue(account.id)?))
    }
}

pub fn template() -> EventTemplate {
    EventTemplate::new(EventName::Login, LoginHandler)
        .required(&["email", "password"])
        .points(5)
        .logged_out()
        .schema(account_schema())
}
