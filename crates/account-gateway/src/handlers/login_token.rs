//! `loginToken`: resume a login with a previously issued token

use account_common::TOKEN_PATTERN;
use account_core::ErrorKind;
use async_trait::async_trait;
use regex::Regex;

use super::error::{HandlerError, HandlerResult};
use super::shared::str_field;
use crate::events::{EventContext, EventHandler, EventName, EventTemplate, RegistryError};
use crate::protocol::Payload;
use crate::schema::{Schema, StringRule};

pub struct LoginTokenHandler;

#[async_trait]
impl EventHandler for LoginTokenHandler {
    async fn handle(&self, ctx: &EventContext<'_>, payload: Payload) -> HandlerResult<Payload> {
        let token = str_field(&payload, "token")?;

        let account_id = ctx
            .tokens()
            .verify(token)
            .map_err(|_| HandlerError::rejected(ErrorKind::InvalidToken))?;

        // The account may have been removed since the token was issued
        if ctx.accounts().find_by_id(account_id).await?.is_none() {
            return Err(HandlerError::rejected(ErrorKind::InvalidToken));
        }

        if ctx.login(account_id) {
            tracing::debug!(
                connection_id = %ctx.connection_id(),
                account_id = %account_id,
                "Logged in with token"
            );
        } else {
            tracing::debug!(
                connection_id = %ctx.connection_id(),
                account_id = %account_id,
                "Connection closed before token login finished"
            );
        }

        Ok(Payload::new())
    }
}

pub fn template() -> Result<EventTemplate, RegistryError> {
    let token_rule = StringRule::new()
        .required()
        .pattern(Regex::new(TOKEN_PATTERN)?);

    Ok(EventTemplate::new(EventName::LoginToken, LoginTokenHandler)
        .required(&["token"])
        .points(5)
        .logged_out()
        .schema(Schema::new().field("token", token_rule)))
}
