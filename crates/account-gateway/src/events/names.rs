//! Event names
//!
//! Closed sets of the events a client may send and the events the server
//! may push.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Events a client may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventName {
    /// Create an account and log in
    Register,
    /// Log in with email and password
    Login,
    /// Log in with a previously issued token
    LoginToken,
    /// Report the connection's login state
    IsLoggedIn,
    /// Own account id
    FetchProfileId,
    /// Public data of any account
    FetchProfileData,
    /// Drop the connection's login
    Logout,
}

impl EventName {
    /// Every client event
    pub const ALL: [Self; 7] = [
        Self::Register,
        Self::Login,
        Self::LoginToken,
        Self::IsLoggedIn,
        Self::FetchProfileId,
        Self::FetchProfileData,
        Self::Logout,
    ];

    /// Get the wire name of the event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::LoginToken => "loginToken",
            Self::IsLoggedIn => "isLoggedIn",
            Self::FetchProfileId => "fetchProfileId",
            Self::FetchProfileData => "fetchProfileData",
            Self::Logout => "logout",
        }
    }

    /// Parse an event name from its wire form
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "register" => Some(Self::Register),
            "login" => Some(Self::Login),
            "loginToken" => Some(Self::LoginToken),
            "isLoggedIn" => Some(Self::IsLoggedIn),
            "fetchProfileId" => Some(Self::FetchProfileId),
            "fetchProfileData" => Some(Self::FetchProfileData),
            "logout" => Some(Self::Logout),
            _ => None,
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events the server pushes without a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerEvent {
    /// Another connection logged in to the same account
    NewLogin,
}

impl ServerEvent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewLogin => "newLogin",
        }
    }
}

impl fmt::Display for ServerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
