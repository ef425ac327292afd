//! Catch outcome, cast quality, and reward value objects
//!
//! - CatchTier: rarity of a caught fish
//! - CatchOutcome: result of one loot draw (escaped or caught); ephemeral,
//!   never persisted
//! - CastQuality: timing-skill bucket produced by the client minigame
//! - Reward: gold/points payout derived from a catch tier

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rarity tier of a caught fish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatchTier {
    Normal,
    Rare,
    Epic,
}

impl CatchTier {
    /// All tiers, most common first.
    pub fn all() -> &'static [CatchTier] {
        &[CatchTier::Normal, CatchTier::Rare, CatchTier::Epic]
    }
}

impl fmt::Display for CatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatchTier::Normal => write!(f, "normal"),
            CatchTier::Rare => write!(f, "rare"),
            CatchTier::Epic => write!(f, "epic"),
        }
    }
}

/// Result of a single loot draw.
///
/// Exists only within one fishing request's processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchOutcome {
    /// The fish got away; no reward.
    Escaped,
    /// A fish of the given tier was caught.
    Caught(CatchTier),
}

impl CatchOutcome {
    pub fn is_caught(self) -> bool {
        matches!(self, CatchOutcome::Caught(_))
    }

    pub fn tier(self) -> Option<CatchTier> {
        match self {
            CatchOutcome::Caught(tier) => Some(tier),
            CatchOutcome::Escaped => None,
        }
    }
}

/// Timing-skill bucket from the cast minigame.
///
/// Multiplies the rare and epic loot weights; the normal weight is never
/// scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CastQuality {
    #[default]
    Normal,
    Good,
    Perfect,
}

impl CastQuality {
    /// Multiplier applied to the rare and epic weights.
    pub fn bonus_factor(self) -> f64 {
        match self {
            CastQuality::Normal => 1.0,
            CastQuality::Good => 1.25,
            CastQuality::Perfect => 1.5,
        }
    }
}

impl fmt::Display for CastQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastQuality::Normal => write!(f, "normal"),
            CastQuality::Good => write!(f, "good"),
            CastQuality::Perfect => write!(f, "perfect"),
        }
    }
}

/// Gold and points payout for one catch. Both deltas are non-negative by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub gold: u64,
    pub points: u64,
}

impl Reward {
    pub fn new(gold: u64, points: u64) -> Self {
        Self { gold, points }
    }
}
