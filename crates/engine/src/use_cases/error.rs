//! Error taxonomy for game operations.
//!
//! Three families: user-actionable results (insufficient funds, max level),
//! retryable conflicts from the optimistic-concurrency check, and
//! configuration errors that indicate a corrupted tuning table and must
//! never be silently swallowed.

use thiserror::Error;

use driftline_domain::{DomainError, PlayerId, RodLevel};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// User-actionable; never retried automatically.
    #[error("Not enough gold: need {required}, have {current}")]
    InsufficientFunds { required: u64, current: u64 },

    /// User-actionable; the rod cannot go past the ceiling.
    #[error("Rod already at max level ({level})")]
    MaxLevelReached { level: RodLevel },

    /// The atomic update lost a race; the caller should refetch and may
    /// resubmit.
    #[error("Upgrade conflicted with a concurrent request, please retry")]
    Conflict,

    /// Corrupted tuning table; fatal for the request.
    #[error("Game configuration error: {0}")]
    Config(DomainError),

    #[error("Storage error: {0}")]
    Repo(RepoError),
}

impl GameError {
    pub fn shortfall(&self) -> Option<u64> {
        match self {
            GameError::InsufficientFunds { required, current } => {
                Some(required.saturating_sub(*current))
            }
            _ => None,
        }
    }
}

impl From<RepoError> for GameError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(id) => GameError::PlayerNotFound(id),
            other => GameError::Repo(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortfall() {
        let err = GameError::InsufficientFunds {
            required: 25,
            current: 0,
        };
        assert_eq!(err.shortfall(), Some(25));
        assert_eq!(GameError::Conflict.shortfall(), None);
    }

    #[test]
    fn test_repo_not_found_becomes_player_not_found() {
        let id = PlayerId::new();
        let err: GameError = RepoError::NotFound(id).into();
        assert!(matches!(err, GameError::PlayerNotFound(found) if found == id));
    }
}
