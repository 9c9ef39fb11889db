//! `fetchProfileData`: public data of an account
//!
//! The email is only revealed to the account's owner.

use account_core::{AccountId, ErrorKind};
use async_trait::async_trait;
use serde_json::json;

use super::error::{HandlerError, HandlerResult};
use super::shared::{single, str_field};
use crate::events::{EventContext, EventHandler, EventName, EventTemplate};
use crate::protocol::Payload;
use crate::schema::{Schema, StringRule};

pub struct FetchProfileDataHandler;

#[async_trait]
impl EventHandler for FetchProfileDataHandler {
    async fn handle(&self, ctx: &EventContext<'_>, payload: Payload) -> HandlerResult<Payload> {
        let profile_id = AccountId::parse(str_field(&payload, "profileId")?)
            .map_err(|_| HandlerError::rejected(ErrorKind::ProfileNotFound))?;

        let account = ctx
            .accounts()
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| HandlerError::rejected(ErrorKind::ProfileNotFound))?;

        let mut profile = Payload::new();
        profile.insert("username".to_string(), json!(account.username));
        profile.insert(
            "creationDate".to_string(),
            json!(account.created_at.to_rfc3339()),
        );
        if ctx.account_id() == Some(account.id) {
            profile.insert("email".to_string(), json!(account.email));
        }

        Ok(single("profileData", profile))
    }
}

pub fn template() -> EventTemplate {
    EventTemplate::new(EventName::FetchProfileData, FetchProfileDataHandler)
        .required(&["profileId"])
        .points(5)
        .logged_in()
        .schema(Schema::new().field(
            "profileId",
            StringRule::new().required().exact_length(36).uuid(),
        ))
}
