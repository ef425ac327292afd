//! Driftline domain library.
//!
//! Pure domain types for the fishing game: the player ledger record, the
//! loot/reward/upgrade game systems, and their invariants. This crate has
//! no async runtime and no random number generator - randomness is passed
//! in by the caller so every draw is reproducible in tests.

pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use entities::Player;
pub use error::DomainError;
pub use game_systems::{LootTable, RewardTable, UpgradeCostSchedule};
pub use ids::PlayerId;
pub use value_objects::{CastQuality, CatchOutcome, CatchTier, Reward, RodLevel};
