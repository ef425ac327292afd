//! HTTP response bodies (Engine → Player).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use driftline_domain::{CatchTier, Player, Reward, RodLevel};

/// Player stats as shown to their owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: Uuid,
    pub name: String,
    pub gold: u64,
    pub points: u64,
    pub rod_level: RodLevel,
    pub is_guest: bool,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.to_uuid(),
            name: player.ranked_name(),
            gold: player.gold,
            points: player.points,
            rod_level: player.rod_level,
            is_guest: player.is_guest,
        }
    }
}

/// Result of one cast. `caught == false` means the fish escaped; the
/// player's stats are returned unchanged so the client can re-render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishResponse {
    pub caught: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fish: Option<CatchTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<Reward>,
    pub player: PlayerView,
}

/// Result of a successful rod upgrade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeResponse {
    pub player: PlayerView,
    pub cost_paid: u64,
}

/// Error classification codes shared across HTTP and WebSocket surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthorized,
    PlayerNotFound,
    /// Not enough gold for the upgrade; details carry the shortfall.
    InsufficientFunds,
    /// Rod already at the ceiling.
    MaxLevel,
    /// Optimistic-concurrency check failed; safe to retry after a refetch.
    UpgradeConflict,
    ParseError,
    Internal,
}

/// Structured error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details<T: Serialize>(mut self, details: T) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Insufficient-funds body carrying the shortfall the caller needs to
    /// display.
    pub fn insufficient_funds(required: u64, current: u64) -> Self {
        Self::new(ErrorCode::InsufficientFunds, "Not enough gold").with_details(
            serde_json::json!({
                "required": required,
                "current": current,
                "shortfall": required.saturating_sub(current),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_wire_names() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::InsufficientFunds).expect("serialize"),
            "\"INSUFFICIENT_FUNDS\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::UpgradeConflict).expect("serialize"),
            "\"UPGRADE_CONFLICT\""
        );
    }

    #[test]
    fn test_insufficient_funds_details() {
        let body = ErrorBody::insufficient_funds(25, 0);
        let details = body.details.expect("details");
        assert_eq!(details["shortfall"], 25);
        assert_eq!(details["required"], 25);
        assert_eq!(details["current"], 0);
    }

    #[test]
    fn test_fish_response_omits_reward_on_miss() {
        use chrono::Utc;
        let player = Player::new_guest(Utc::now());
        let response = FishResponse {
            caught: false,
            fish: None,
            reward: None,
            player: PlayerView::from(&player),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("reward").is_none());
        assert!(json.get("fish").is_none());
        assert_eq!(json["caught"], false);
    }
}
