//! User-facing game operations.

pub mod error;
pub mod fishing;
pub mod leaderboard;
pub mod upgrade;

pub use error::GameError;
pub use fishing::{CastLine, CatchReport};
pub use leaderboard::LeaderboardProjection;
pub use upgrade::{UpgradeReceipt, UpgradeRod};
