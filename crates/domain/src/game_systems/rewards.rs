//! Reward table
//!
//! Maps a catch tier to a fixed gold/points payout. The exact values are
//! game-balance tuning, not a structural contract; a missing entry is a
//! configuration error, never a user-facing miss.

use std::collections::HashMap;

use crate::error::DomainError;
use crate::value_objects::{CatchTier, Reward};

/// Fixed payout per catch tier.
#[derive(Debug, Clone)]
pub struct RewardTable {
    rewards: HashMap<CatchTier, Reward>,
}

impl RewardTable {
    /// The shipped tuning: normal 2/2, rare 5/5, epic 10/10.
    pub fn standard() -> Self {
        let mut rewards = HashMap::new();
        rewards.insert(CatchTier::Normal, Reward::new(2, 2));
        rewards.insert(CatchTier::Rare, Reward::new(5, 5));
        rewards.insert(CatchTier::Epic, Reward::new(10, 10));
        Self { rewards }
    }

    /// Build a custom table from raw values.
    ///
    /// Every tier must be present and values fit in u64 (callers passing
    /// signed tuning numbers validate the sign here, keeping "negative
    /// reward" a loud configuration error instead of a wrap).
    pub fn from_raw(entries: &[(CatchTier, i64, i64)]) -> Result<Self, DomainError> {
        let mut rewards = HashMap::new();
        for (tier, gold, points) in entries {
            if *gold < 0 || *points < 0 {
                return Err(DomainError::configuration(format!(
                    "reward for tier '{}' has negative values ({}, {})",
                    tier, gold, points
                )));
            }
            #[allow(clippy::cast_sign_loss)]
            rewards.insert(*tier, Reward::new(*gold as u64, *points as u64));
        }
        let table = Self { rewards };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), DomainError> {
        for tier in CatchTier::all() {
            if !self.rewards.contains_key(tier) {
                return Err(DomainError::configuration(format!(
                    "no reward configured for tier '{}'",
                    tier
                )));
            }
        }
        Ok(())
    }

    /// Look up the payout for a caught tier.
    pub fn resolve(&self, tier: CatchTier) -> Result<Reward, DomainError> {
        self.rewards.get(&tier).copied().ok_or_else(|| {
            DomainError::configuration(format!("no reward configured for tier '{}'", tier))
        })
    }
}

impl Default for RewardTable {
    fn default() -> Self {
        Self::standard()
    }
}
