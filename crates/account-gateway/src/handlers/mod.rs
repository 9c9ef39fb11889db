//! Event handlers
//!
//! One module per client event. Each exposes its handler type and a
//! `template()` describing the checks the dispatcher runs first.

mod error;
mod fetch_profile_data;
mod fetch_profile_id;
mod is_logged_in;
mod login;
mod login_token;
mod logout;
mod register;
mod shared;

pub use error::{HandlerError, HandlerResult};
pub use fetch_profile_data::FetchProfileDataHandler;
pub use fetch_profile_id::FetchProfileIdHandler;
pub use is_logged_in::IsLoggedInHandler;
pub use login::LoginHandler;
pub use login_token::LoginTokenHandler;
pub use logout::LogoutHandler;
pub use register::RegisterHandler;
pub use shared::account_schema;

use crate::events::{EventRegistry, RegistryError};

/// Registry holding every client event
pub fn default_registry() -> Result<EventRegistry, RegistryError> {
    Ok(EventRegistry::builder()
        .register(register::template())?
        .register(login::template())?
        .register(login_token::template()?)?
        .register(is_logged_in::template())?
        .register(fetch_profile_id::template())?
        .register(fetch_profile_data::template())?
        .register(logout::template())?
        .build())
}
