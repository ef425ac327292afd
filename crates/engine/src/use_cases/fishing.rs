//! The fishing operation: one cast, one loot draw, one ledger update.

use std::sync::Arc;

use driftline_domain::{CastQuality, CatchOutcome, LootTable, Player, Reward, RewardTable};

use crate::infrastructure::ports::{PlayerRepo, RandomPort};
use crate::use_cases::error::GameError;
use crate::use_cases::leaderboard::LeaderboardProjection;

/// What one cast produced.
#[derive(Debug, Clone)]
pub struct CatchReport {
    pub outcome: CatchOutcome,
    pub reward: Option<Reward>,
    pub player: Player,
}

pub struct CastLine {
    players: Arc<dyn PlayerRepo>,
    random: Arc<dyn RandomPort>,
    loot: LootTable,
    rewards: RewardTable,
    leaderboard: Arc<LeaderboardProjection>,
}

impl CastLine {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        random: Arc<dyn RandomPort>,
        loot: LootTable,
        rewards: RewardTable,
        leaderboard: Arc<LeaderboardProjection>,
    ) -> Self {
        Self {
            players,
            random,
            loot,
            rewards,
            leaderboard,
        }
    }

    /// Roll the loot table for one cast and apply the payout.
    ///
    /// A miss returns the player's stats unchanged. A catch increments
    /// gold and points (commutative, so concurrent catches both land) and
    /// pushes a fresh leaderboard to all subscribers.
    pub async fn execute(
        &self,
        id: driftline_domain::PlayerId,
        quality: CastQuality,
    ) -> Result<CatchReport, GameError> {
        let player = self
            .players
            .get(id)
            .await?
            .ok_or(GameError::PlayerNotFound(id))?;

        let roll = self.random.roll_percent();
        let outcome = self.loot.evaluate(player.rod_level, quality, roll);

        let Some(tier) = outcome.tier() else {
            tracing::debug!(player_id = %id, quality = %quality, "fish escaped");
            return Ok(CatchReport {
                outcome,
                reward: None,
                player,
            });
        };

        let reward = self.rewards.resolve(tier).map_err(|e| {
            tracing::error!(error = %e, tier = %tier, "Reward table misconfigured");
            GameError::Config(e)
        })?;

        let player = self.players.record_catch(id, reward).await?;
        tracing::info!(
            player_id = %id,
            tier = %tier,
            gold = reward.gold,
            points = reward.points,
            "Catch recorded"
        );

        // Points changed, so the ranking may have; fan out the new view.
        self.leaderboard.broadcast().await;

        Ok(CatchReport {
            outcome,
            reward: Some(reward),
            player,
        })
    }
}
