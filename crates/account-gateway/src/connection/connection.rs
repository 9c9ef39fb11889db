//! Individual WebSocket connection

use crate::protocol::ServerFrame;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// A live WebSocket connection
///
/// Holds the sending half of the connection's outbound queue; the socket
/// writer task owns the receiving half.
pub struct Connection {
    /// Connection identifier
    connection_id: String,

    /// Outbound frame queue
    sender: mpsc::Sender<ServerFrame>,

    /// When the socket was accepted
    connected_at: Instant,

    /// Last inbound frame
    last_activity: Mutex<Instant>,

    /// Events whose dispatch has not finished
    in_flight: AtomicUsize,
}

impl Connection {
    /// Create a new connection
    #[must_use]
    pub fn new(connection_id: String, sender: mpsc::Sender<ServerFrame>) -> Arc<Self> {
        let now = Instant::now();
        Arc::new(Self {
            connection_id,
            sender,
            connected_at: now,
            last_activity: Mutex::new(now),
            in_flight: AtomicUsize::new(0),
        })
    }

    pub fn id(&self) -> &str {
        &self.connection_id
    }

    /// Record inbound traffic
    pub fn touch(&self) {
        *self.last_activity.lock() = Instant::now();
    }

    /// Time since the last inbound frame, zero while an event is running
    pub fn idle_for(&self) -> Duration {
        if self.is_busy() {
            return Duration::ZERO;
        }
        self.last_activity.lock().elapsed()
    }

    /// Mark an event as running until the guard drops
    pub fn begin_event(self: &Arc<Self>) -> InFlightEvent {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlightEvent {
            connection: Arc::clone(self),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Get connection age
    pub fn age(&self) -> Duration {
        self.connected_at.elapsed()
    }

    /// Queue a frame, waiting for room
    pub async fn send(&self, frame: ServerFrame) -> Result<(), mpsc::error::SendError<ServerFrame>> {
        self.sender.send(frame).await
    }

    /// Queue a frame without waiting
    pub fn try_send(&self, frame: ServerFrame) -> Result<(), mpsc::error::TrySendError<ServerFrame>> {
        self.sender.try_send(frame)
    }

    /// Check if the writer side has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Keeps a connection counted as active while its event runs
#[derive(Debug)]
pub struct InFlightEvent {
    connection: Arc<Connection>,
}

impl Drop for InFlightEvent {
    fn drop(&mut self) {
        // Idle time restarts when the event finishes
        self.connection.touch();
        self.connection.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("connection_id", &self.connection_id)
            .field("age", &self.age())
            .finish_non_exhaustive()
    }
}
