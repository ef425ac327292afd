//! Connection registry for WebSocket clients.
//!
//! Every live socket owns a bounded outbound channel; the registry maps
//! connection ids to the sending half so game operations can fan out
//! leaderboard pushes without touching socket state. Sends never block:
//! a full buffer drops the message for that subscriber and the next
//! snapshot supersedes it anyway.

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use driftline_shared::ServerMessage;

/// Manages all active WebSocket connections.
pub struct ConnectionManager {
    connections: DashMap<Uuid, mpsc::Sender<ServerMessage>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a new connection.
    pub fn register(&self, connection_id: Uuid, sender: mpsc::Sender<ServerMessage>) {
        self.connections.insert(connection_id, sender);
        tracing::debug!(connection_id = %connection_id, "Connection registered");
    }

    /// Unregister a connection.
    pub fn unregister(&self, connection_id: Uuid) {
        if self.connections.remove(&connection_id).is_some() {
            tracing::debug!(connection_id = %connection_id, "Connection unregistered");
        }
    }

    /// Broadcast a message to every connection.
    pub fn broadcast(&self, message: ServerMessage) {
        for entry in self.connections.iter() {
            if let Err(e) = entry.value().try_send(message.clone()) {
                tracing::warn!(
                    connection_id = %entry.key(),
                    error = %e,
                    "Failed to broadcast message"
                );
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_broadcast_unregister() {
        let manager = ConnectionManager::new();
        let id = Uuid::new_v4();
        let (tx, mut rx) = mpsc::channel(4);
        manager.register(id, tx);
        assert_eq!(manager.subscriber_count(), 1);

        manager.broadcast(ServerMessage::Pong);
        assert!(matches!(rx.recv().await, Some(ServerMessage::Pong)));

        manager.unregister(id);
        assert_eq!(manager.subscriber_count(), 0);
        manager.broadcast(ServerMessage::Pong);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_drops_for_full_buffer_only() {
        let manager = ConnectionManager::new();
        let (tx_full, _rx_full) = mpsc::channel(1);
        tx_full
            .try_send(ServerMessage::Pong)
            .expect("buffer has room");
        let (tx_live, mut rx_live) = mpsc::channel(4);
        manager.register(Uuid::new_v4(), tx_full);
        manager.register(Uuid::new_v4(), tx_live);

        manager.broadcast(ServerMessage::Pong);
        assert!(matches!(rx_live.recv().await, Some(ServerMessage::Pong)));
    }
}
