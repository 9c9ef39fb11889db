//! `register`: create an account and log the connection in

use account_core::{email_domain, Account, ErrorKind};
use async_trait::async_trait;

use super::error::{HandlerError, HandlerResult};
use super::shared::{account_schema, single, str_field};
use crate::events::{EventContext, EventHandler, EventName, EventTemplate};
use crate::protocol::Payload;

pub struct RegisterHandler;

#[async_trait]
impl EventHandler for RegisterHandler {
    async fn handle(&self, ctx: &EventContext<'_>, payload: Payload) -> HandlerResult<Payload> {
        let email = str_field(&payload, "email")?;
        let password = str_field(&payload, "password")?;

        let policy = &ctx.config().accounts;
        if email_domain(email).is_some_and(|domain| policy.is_blacklisted(domain)) {
            return Err(HandlerError::rejected(ErrorKind::RequiredEmail));
        }

        let accounts = ctx.accounts();
        if accounts.email_exists(email).await? {
            return Err(HandlerError::rejected(ErrorKind::AccountAlreadyExists));
        }

        let username = Account::default_username(accounts.count().await? + 1);
        let account = Account::new(username, email.to_string());
        let password_hash = ctx.hasher().hash(password)?;

        // A racing registration of the same email fails here with a conflict
        accounts.create(&account, &password_hash).await?;

        if !ctx.login(account.id) {
            tracing::debug!(
                connection_id = %ctx.connection_id(),
                account_id = %account.id,
                "Connection closed before registration finished"
            );
        }

        tracing::info!(
            connection_id = %ctx.connection_id(),
            account_id = %account.id,
            username = %account.username,
            "Account registered"
        );

        Ok(single("token", ctx.tokens().issue(account.id)?))
    }
}

pub fn template() -> EventTemplate {
    EventTemplate::new(EventName::Register, RegisterHandler)
        .required(&["email", "password"])
        .points(5)
        .logged_out()
        .schema(account_schema())
}
