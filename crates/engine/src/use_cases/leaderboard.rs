//! Leaderboard projection.
//!
//! A derived view over the player table: top-N ranked players, most points
//! first. Recomputed on every points-changing event (successful catches)
//! and broadcast to every connected subscriber; upgrades leave points
//! untouched and trigger nothing. Holds no state of its own beyond the
//! subscriber registry it broadcasts through.

use std::sync::Arc;

use driftline_shared::{LeaderboardEntry, ServerMessage};

use crate::api::connections::ConnectionManager;
use crate::infrastructure::ports::PlayerRepo;
use crate::use_cases::error::GameError;

/// Rows pushed over the live channel.
pub const PUSH_SIZE: u32 = 10;

/// Cap for one-shot HTTP fetches.
pub const PAGE_SIZE: u32 = 50;

pub struct LeaderboardProjection {
    players: Arc<dyn PlayerRepo>,
    connections: Arc<ConnectionManager>,
}

impl LeaderboardProjection {
    pub fn new(players: Arc<dyn PlayerRepo>, connections: Arc<ConnectionManager>) -> Self {
        Self {
            players,
            connections,
        }
    }

    /// The top-N snapshot sent over the push channel.
    pub async fn project(&self) -> Result<Vec<LeaderboardEntry>, GameError> {
        self.page(PUSH_SIZE).await
    }

    /// A larger one-shot page for plain HTTP fetches.
    pub async fn page(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, GameError> {
        let players = self.players.top_ranked(limit.min(PAGE_SIZE)).await?;
        Ok(players.iter().map(LeaderboardEntry::from).collect())
    }

    /// Recompute and fan out to all subscribers.
    ///
    /// Failures here are logged and dropped: the push channel must never
    /// affect the ledger operation that triggered it.
    pub async fn broadcast(&self) {
        match self.project().await {
            Ok(entries) => {
                self.connections
                    .broadcast(ServerMessage::LeaderboardUpdate { entries });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to project leaderboard for broadcast");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use driftline_domain::Player;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    use crate::infrastructure::persistence::MemoryPlayerRepo;

    async fn seeded_projection(points: &[u64]) -> LeaderboardProjection {
        let repo = Arc::new(MemoryPlayerRepo::new());
        for (i, p) in points.iter().enumerate() {
            let mut player =
                Player::new_guest(Utc::now() + chrono::Duration::seconds(i as i64));
            player.points = *p;
            repo.create(&player).await.expect("create");
        }
        LeaderboardProjection::new(repo, Arc::new(ConnectionManager::new()))
    }

    #[tokio::test]
    async fn test_projection_sorted_descending_and_bounded() {
        let points: Vec<u64> = (0..25).map(|i| i * 3).collect();
        let projection = seeded_projection(&points).await;

        let entries = projection.project().await.expect("project");
        assert_eq!(entries.len(), PUSH_SIZE as usize);
        assert!(entries.windows(2).all(|w| w[0].points >= w[1].points));
        assert_eq!(entries[0].points, 72);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_subscriber() {
        let projection = seeded_projection(&[5, 10]).await;
        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, mut rx_b) = mpsc::channel(4);
        projection.connections.register(Uuid::new_v4(), tx_a);
        projection.connections.register(Uuid::new_v4(), tx_b);

        projection.broadcast().await;

        for rx in [&mut rx_a, &mut rx_b] {
            match rx.recv().await.expect("message") {
                ServerMessage::LeaderboardUpdate { entries } => {
                    assert_eq!(entries.len(), 2);
                    assert_eq!(entries[0].points, 10);
                }
                other => panic!("unexpected message: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_full_subscriber_does_not_block_others() {
        let projection = seeded_projection(&[1]).await;
        let (tx_stuck, _rx_stuck) = mpsc::channel(1);
        // Fill the stuck subscriber's buffer.
        tx_stuck
            .try_send(ServerMessage::Pong)
            .expect("buffer has room");
        let (tx_live, mut rx_live) = mpsc::channel(4);
        projection.connections.register(Uuid::new_v4(), tx_stuck);
        projection.connections.register(Uuid::new_v4(), tx_live);

        projection.broadcast().await;

        assert!(matches!(
            rx_live.recv().await,
            Some(ServerMessage::LeaderboardUpdate { .. })
        ));
    }
}
