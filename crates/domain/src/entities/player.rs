//! Player entity - the persisted progression record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::value_objects::RodLevel;

/// A player's ledger row: balances, equipment, and account flags.
///
/// Gold and points are unsigned so a committed row can never go negative;
/// the conditional-update discipline in the engine keeps it that way under
/// concurrent requests. Points only ever increase under normal play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    /// Display name; None until the account is verified or named.
    pub display_name: Option<String>,
    pub gold: u64,
    pub points: u64,
    pub rod_level: RodLevel,
    pub is_guest: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a fresh guest player with starting stats.
    pub fn new_guest(now: DateTime<Utc>) -> Self {
        Self {
            id: PlayerId::new(),
            display_name: None,
            gold: 0,
            points: 0,
            rod_level: RodLevel::MIN,
            is_guest: true,
            is_verified: false,
            created_at: now,
        }
    }

    /// Whether this player appears in the public ranking.
    ///
    /// Guests and verified accounts rank; unverified pending registrations
    /// do not.
    pub fn is_ranked(&self) -> bool {
        self.is_guest || self.is_verified
    }

    /// Name shown on the leaderboard, with a stable fallback for players
    /// who have not set one.
    pub fn ranked_name(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None if self.is_guest => format!("Guest-{}", self.id.short()),
            None => format!("Angler-{}", self.id.short()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_guest_starts_at_level_one_with_nothing() {
        let player = Player::new_guest(Utc::now());
        assert_eq!(player.gold, 0);
        assert_eq!(player.points, 0);
        assert_eq!(player.rod_level, RodLevel::MIN);
        assert!(player.is_guest);
        assert!(!player.is_verified);
    }

    #[test]
    fn test_guest_is_ranked_but_pending_registration_is_not() {
        let mut player = Player::new_guest(Utc::now());
        assert!(player.is_ranked());

        player.is_guest = false;
        assert!(!player.is_ranked());

        player.is_verified = true;
        assert!(player.is_ranked());
    }

    #[test]
    fn test_ranked_name_fallbacks() {
        let mut player = Player::new_guest(Utc::now());
        assert!(player.ranked_name().starts_with("Guest-"));

        player.is_guest = false;
        player.is_verified = true;
        assert!(player.ranked_name().starts_with("Angler-"));

        player.display_name = Some("Otto".to_string());
        assert_eq!(player.ranked_name(), "Otto");
    }
}
