//! Gateway message format

use account_core::ErrorValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event arguments and results: a JSON object
pub type Payload = Map<String, Value>;

/// Frame sent by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientFrame {
    /// Event name
    pub event: String,

    /// Event arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,

    /// Acknowledgement id; the server only replies when one is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack: Option<u64>,
}

impl ClientFrame {
    /// Take the arguments, treating a missing `data` as an empty object
    pub fn into_parts(self) -> (String, Payload, Option<u64>) {
        (self.event, self.data.unwrap_or_default(), self.ack)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// How a request ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReplyOutcome {
    #[serde(rename = "data")]
    Data(Payload),
    #[serde(rename = "err")]
    Err(ErrorValue),
}

impl From<Result<Payload, ErrorValue>> for ReplyOutcome {
    fn from(result: Result<Payload, ErrorValue>) -> Self {
        match result {
            Ok(data) => Self::Data(data),
            Err(err) => Self::Err(err),
        }
    }
}

/// Answer to a client request carrying an ack id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyFrame {
    pub ack: u64,
    #[serde(flatten)]
    pub outcome: ReplyOutcome,
}

/// Server-initiated event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushFrame {
    pub event: String,
    pub data: Payload,
}

/// Any frame the server writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerFrame {
    Reply(ReplyFrame),
    Push(PushFrame),
}

impl ServerFrame {
    #[must_use]
    pub fn reply(ack: u64, result: Result<Payload, ErrorValue>) -> Self {
        Self::Reply(ReplyFrame {
            ack,
            outcome: result.into(),
        })
    }

    #[must_use]
    pub fn push(event: impl Into<String>, data: Payload) -> Self {
        Self::Push(PushFrame {
            event: event.into(),
            data,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for ServerFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reply(reply) => write!(f, "Reply(ack={})", reply.ack),
            Self::Push(push) => write!(f, "Push({})", push.event),
        }
    }
}
