//! Port traits the use cases depend on.
//!
//! The ledger's synchronization primitive is `commit_upgrade`: one
//! conditional update scoped to a single player row. There is no global
//! lock; two racing upgrades for the same player are serialized by the
//! store's atomic check, and catches are plain commutative increments.

use async_trait::async_trait;
use thiserror::Error;

use driftline_domain::{Player, PlayerId, Reward, RodLevel};

/// Errors from the persistence store.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Player not found: {0}")]
    NotFound(PlayerId),

    #[error("Database error: {0}")]
    Database(String),
}

/// Result of the upgrade's atomic conditional update.
#[derive(Debug, Clone)]
pub enum UpgradeCommit {
    /// The check held at commit time; row updated.
    Committed(Player),
    /// `gold >= cost AND rod_level = expected` no longer held - another
    /// request changed the row between read and commit.
    PreconditionFailed,
}

/// Persistence port for player ledger rows.
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError>;

    async fn create(&self, player: &Player) -> Result<(), RepoError>;

    /// Apply a catch reward as commutative increments.
    ///
    /// Safe under concurrent catches for the same player: both must be
    /// reflected (a lost update is a correctness bug). Returns the updated
    /// row.
    async fn record_catch(&self, id: PlayerId, reward: Reward) -> Result<Player, RepoError>;

    /// Atomically `gold -= cost, rod_level += 1` iff `gold >= cost` and
    /// the level still equals `expected_level`.
    async fn commit_upgrade(
        &self,
        id: PlayerId,
        expected_level: RodLevel,
        cost: u64,
    ) -> Result<UpgradeCommit, RepoError>;

    /// Top ranked players (guests and verified accounts), most points
    /// first, ties broken by registration order.
    async fn top_ranked(&self, limit: u32) -> Result<Vec<Player>, RepoError>;
}

/// Uniform random source for the loot draw.
///
/// Injected rather than read from a global generator so tests can script
/// the exact sequence of rolls.
pub trait RandomPort: Send + Sync {
    /// A uniform value in [0, 100).
    fn roll_percent(&self) -> f64;
}
