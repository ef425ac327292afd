//! Value objects for the fishing game.

mod catch;
mod rod_level;

pub use catch::{CastQuality, CatchOutcome, CatchTier, Reward};
pub use rod_level::RodLevel;
