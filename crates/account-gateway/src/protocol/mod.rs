//! Gateway protocol definitions
//!
//! Every WebSocket text frame carries one JSON object: client requests name
//! an event and may ask for an acknowledgement, the server answers with an
//! ack reply or pushes an unsolicited event.

mod messages;

pub use messages::{ClientFrame, Payload, PushFrame, ReplyFrame, ReplyOutcome, ServerFrame};
