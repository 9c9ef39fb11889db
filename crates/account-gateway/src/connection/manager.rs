//! Connection manager
//!
//! Manages all active WebSocket connections using DashMap for thread-safe access.

use super::Connection;
use crate::protocol::ServerFrame;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Manages all active WebSocket connections
#[derive(Default)]
pub struct ConnectionManager {
    /// Active connections by connection ID
    connections: DashMap<String, Arc<Connection>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(
        &self,
        connection_id: String,
        sender: mpsc::Sender<ServerFrame>,
    ) -> Arc<Connection> {
        let connection = Connection::new(connection_id.clone(), sender);
        self.connections.insert(connection_id.clone(), connection.clone());

        tracing::debug!(connection_id = %connection_id, "Connection added");

        connection
    }

    /// Remove a connection
    pub fn remove_connection(&self, connection_id: &str) -> Option<Arc<Connection>> {
        let removed = self.connections.remove(connection_id).map(|(_, c)| c);
        if removed.is_some() {
            tracing::debug!(connection_id = %connection_id, "Connection removed");
        }
        removed
    }

    /// Get a connection by ID
    pub fn get_connection(&self, connection_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(connection_id).map(|r| r.clone())
    }

    /// Push a frame to each listed connection, skipping any that are gone
    ///
    /// Never waits on a slow client; a full queue drops the frame for that
    /// connection only. Returns how many connections accepted the frame.
    pub fn send_to<'a>(
        &self,
        connection_ids: impl IntoIterator<Item = &'a str>,
        frame: &ServerFrame,
    ) -> usize {
        let mut sent = 0;

        for connection_id in connection_ids {
            let Some(connection) = self.get_connection(connection_id) else {
                continue;
            };
            match connection.try_send(frame.clone()) {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        frame = %frame,
                        error = %e,
                        "Failed to queue frame"
                    );
                }
            }
        }

        sent
    }

    /// Push a frame to every connection
    pub fn broadcast(&self, frame: &ServerFrame) -> usize {
        let ids: Vec<String> = self.connections.iter().map(|r| r.key().clone()).collect();
        self.send_to(ids.iter().map(String::as_str), frame)
    }

    /// Get total connection count
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Payload;

    fn frame() -> ServerFrame {
        ServerFrame::push("newLogin", Payload::new())
    }

    #[test]
    fn test_add_remove() {
        let manager = ConnectionManager::new();
        let (tx, _rx) = mpsc::channel(4);

        manager.add_connection("c1".to_string(), tx);
        assert_eq!(manager.connection_count(), 1);
        assert!(manager.get_connection("c1").is_some());

        assert!(manager.remove_connection("c1").is_some());
        assert!(manager.remove_connection("c1").is_none());
        assert_eq!(manager.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_send_to_skips_missing() {
        let manager = ConnectionManager::new();
        let (tx1, mut rx1) = mpsc::channel(4);
        let (tx2, mut rx2) = mpsc::channel(4);
        manager.add_connection("c1".to_string(), tx1);
        manager.add_connection("c2".to_string(), tx2);

        let sent = manager.send_to(["c1", "gone"], &frame());

        assert_eq!(sent, 1);
        assert_eq!(rx1.recv().await, Some(frame()));
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_full_queue_does_not_block() {
        let manager = ConnectionManager::new();
        let (tx, _rx) = mpsc::channel(1);
        manager.add_connection("c1".to_string(), tx);

        assert_eq!(manager.send_to(["c1"], &frame()), 1);
        assert_eq!(manager.send_to(["c1"], &frame()), 0);
    }

    #[test]
    fn test_broadcast() {
        let manager = ConnectionManager::new();
        let receivers: Vec<_> = (0..3)
            .map(|i| {
                let (tx, rx) = mpsc::channel(4);
                manager.add_connection(format!("c{i}"), tx);
                rx
            })
            .collect();

        assert_eq!(manager.broadcast(&frame()), 3);
        drop(receivers);
    }
}
