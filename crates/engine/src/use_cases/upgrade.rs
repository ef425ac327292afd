//! The rod upgrade operation.
//!
//! Read, validate, then commit through one atomic conditional update. If
//! the commit-time check fails, the row is re-read: when the fresh state
//! genuinely no longer qualifies the caller gets the user-actionable error
//! for that state, otherwise a retryable conflict.

use std::sync::Arc;

use driftline_domain::{Player, PlayerId, UpgradeCostSchedule};

use crate::infrastructure::ports::{PlayerRepo, UpgradeCommit};
use crate::use_cases::error::GameError;

/// A committed upgrade.
#[derive(Debug, Clone)]
pub struct UpgradeReceipt {
    pub player: Player,
    pub cost_paid: u64,
}

pub struct UpgradeRod {
    players: Arc<dyn PlayerRepo>,
    costs: UpgradeCostSchedule,
}

impl UpgradeRod {
    pub fn new(players: Arc<dyn PlayerRepo>, costs: UpgradeCostSchedule) -> Self {
        Self { players, costs }
    }

    pub async fn execute(&self, id: PlayerId) -> Result<UpgradeReceipt, GameError> {
        let player = self
            .players
            .get(id)
            .await?
            .ok_or(GameError::PlayerNotFound(id))?;

        if player.rod_level.is_max() {
            return Err(GameError::MaxLevelReached {
                level: player.rod_level,
            });
        }

        let cost = self
            .costs
            .cost_for(player.rod_level)
            .map_err(GameError::Config)?;

        if player.gold < cost {
            return Err(GameError::InsufficientFunds {
                required: cost,
                current: player.gold,
            });
        }

        match self
            .players
            .commit_upgrade(id, player.rod_level, cost)
            .await?
        {
            UpgradeCommit::Committed(updated) => {
                tracing::info!(
                    player_id = %id,
                    rod_level = %updated.rod_level,
                    cost_paid = cost,
                    "Rod upgraded"
                );
                Ok(UpgradeReceipt {
                    player: updated,
                    cost_paid: cost,
                })
            }
            UpgradeCommit::PreconditionFailed => self.classify_failure(id).await,
        }
    }

    /// The atomic check failed at commit time; decide what to tell the
    /// caller based on the row as it is now.
    async fn classify_failure(&self, id: PlayerId) -> Result<UpgradeReceipt, GameError> {
        let now = self
            .players
            .get(id)
            .await?
            .ok_or(GameError::PlayerNotFound(id))?;

        if now.rod_level.is_max() {
            return Err(GameError::MaxLevelReached {
                level: now.rod_level,
            });
        }

        let cost_now = self
            .costs
            .cost_for(now.rod_level)
            .map_err(GameError::Config)?;

        if now.gold < cost_now {
            return Err(GameError::InsufficientFunds {
                required: cost_now,
                current: now.gold,
            });
        }

        // Still upgradeable with the fresh state: the caller only lost a
        // race and may retry.
        Err(GameError::Conflict)
    }
}
