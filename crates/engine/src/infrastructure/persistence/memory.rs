//! In-memory player repository.
//!
//! Same CAS semantics as the SQLite adapter over a `DashMap`; the per-key
//! write lock makes each mutation atomic. Used by tests and by local runs
//! without a database file.

use async_trait::async_trait;
use dashmap::DashMap;

use driftline_domain::{Player, PlayerId, Reward, RodLevel};

use crate::infrastructure::ports::{PlayerRepo, RepoError, UpgradeCommit};

/// DashMap-backed `PlayerRepo`.
#[derive(Default)]
pub struct MemoryPlayerRepo {
    players: DashMap<PlayerId, Player>,
}

impl MemoryPlayerRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepo for MemoryPlayerRepo {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        Ok(self.players.get(&id).map(|entry| entry.clone()))
    }

    async fn create(&self, player: &Player) -> Result<(), RepoError> {
        self.players.insert(player.id, player.clone());
        Ok(())
    }

    async fn record_catch(&self, id: PlayerId, reward: Reward) -> Result<Player, RepoError> {
        let mut entry = self.players.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        entry.gold += reward.gold;
        entry.points += reward.points;
        Ok(entry.clone())
    }

    async fn commit_upgrade(
        &self,
        id: PlayerId,
        expected_level: RodLevel,
        cost: u64,
    ) -> Result<UpgradeCommit, RepoError> {
        let mut entry = self.players.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        if entry.gold < cost || entry.rod_level != expected_level {
            return Ok(UpgradeCommit::PreconditionFailed);
        }
        let next = entry
            .rod_level
            .next()
            .map_err(|e| RepoError::Database(e.to_string()))?;
        entry.gold -= cost;
        entry.rod_level = next;
        Ok(UpgradeCommit::Committed(entry.clone()))
    }

    async fn top_ranked(&self, limit: u32) -> Result<Vec<Player>, RepoError> {
        let mut ranked: Vec<Player> = self
            .players
            .iter()
            .filter(|entry| entry.is_ranked())
            .map(|entry| entry.clone())
            .collect();
        ranked.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.to_uuid().cmp(&b.id.to_uuid()))
        });
        ranked.truncate(limit as usize);
        Ok(ranked)
    }
}
