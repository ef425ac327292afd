//! WebSocket message types for Engine-Player communication
//!
//! The push channel carries leaderboard snapshots: one is delivered on
//! subscribe, then again every time a catch changes the ranking. Message
//! enums are type-tagged JSON so either side can evolve independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use driftline_domain::{Player, RodLevel};

use crate::responses::ErrorCode;

/// One row of the public ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_id: Uuid,
    pub name: String,
    pub points: u64,
    pub rod_level: RodLevel,
}

impl From<&Player> for LeaderboardEntry {
    fn from(player: &Player) -> Self {
        Self {
            player_id: player.id.to_uuid(),
            name: player.ranked_name(),
            points: player.points,
            rod_level: player.rod_level,
        }
    }
}

/// Messages from client (Player) to server (Engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Keep-alive ping
    Heartbeat,
    /// Ask for a fresh leaderboard snapshot
    LeaderboardGet,
}

/// Messages from server (Engine) to client (Player)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Keep-alive reply
    Pong,
    /// Full ranked snapshot, top-N, most points first
    LeaderboardUpdate { entries: Vec<LeaderboardEntry> },
    /// Something went wrong handling a client message
    Error { code: ErrorCode, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_tagging() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"LeaderboardGet"}"#).expect("deserialize");
        assert!(matches!(msg, ClientMessage::LeaderboardGet));
    }

    #[test]
    fn test_leaderboard_update_round_trip() {
        let msg = ServerMessage::LeaderboardUpdate {
            entries: vec![LeaderboardEntry {
                player_id: Uuid::new_v4(),
                name: "Otto".to_string(),
                points: 42,
                rod_level: RodLevel::MIN,
            }],
        };
        let json = serde_json::to_string(&msg).expect("serialize");
        assert!(json.contains("\"type\":\"LeaderboardUpdate\""));
        let back: ServerMessage = serde_json::from_str(&json).expect("deserialize");
        match back {
            ServerMessage::LeaderboardUpdate { entries } => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].points, 42);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
