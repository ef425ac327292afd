//! Application state and composition.

use std::sync::Arc;

use driftline_domain::{LootTable, RewardTable, UpgradeCostSchedule};

use crate::api::ConnectionManager;
use crate::infrastructure::ports::{PlayerRepo, RandomPort};
use crate::use_cases::{CastLine, LeaderboardProjection, UpgradeRod};

/// Main application state.
///
/// Holds the player store, the connection registry and the wired use
/// cases. Passed to HTTP/WebSocket handlers via Axum state.
pub struct App {
    pub players: Arc<dyn PlayerRepo>,
    pub connections: Arc<ConnectionManager>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub cast_line: CastLine,
    pub upgrade_rod: UpgradeRod,
    pub leaderboard: Arc<LeaderboardProjection>,
}

impl App {
    /// Create a new App with the standard tuning tables wired up.
    pub fn new(players: Arc<dyn PlayerRepo>, random: Arc<dyn RandomPort>) -> Self {
        let connections = Arc::new(ConnectionManager::new());
        let leaderboard = Arc::new(LeaderboardProjection::new(
            players.clone(),
            connections.clone(),
        ));
        let cast_line = CastLine::new(
            players.clone(),
            random,
            LootTable::standard(),
            RewardTable::standard(),
            leaderboard.clone(),
        );
        let upgrade_rod = UpgradeRod::new(players.clone(), UpgradeCostSchedule::standard());

        Self {
            players,
            connections,
            use_cases: UseCases {
                cast_line,
                upgrade_rod,
                leaderboard,
            },
        }
    }
}
