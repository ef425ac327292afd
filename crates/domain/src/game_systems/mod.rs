//! Game systems: the tunable tables that drive progression.
//!
//! All three systems are pure lookups/draws over validated configuration.
//! The loot draw takes the rolled value as an argument rather than owning
//! an RNG, so tests can pin exact outcomes.

mod loot;
mod rewards;
mod upgrade;

pub use loot::{LootTable, LootWeights};
pub use rewards::RewardTable;
pub use upgrade::UpgradeCostSchedule;
