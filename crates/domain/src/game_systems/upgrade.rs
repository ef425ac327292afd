//! Upgrade cost schedule
//!
//! Cost to go from level N to N+1, for N in [1, 4]. Strictly increasing.
//! The max level has no cost; callers must check the ceiling before asking.

use crate::error::DomainError;
use crate::value_objects::RodLevel;

/// Gold cost per upgrade step.
#[derive(Debug, Clone)]
pub struct UpgradeCostSchedule {
    // costs[i] upgrades from level i+1 to i+2.
    costs: [u64; 4],
}

impl UpgradeCostSchedule {
    /// The shipped tuning: 10, 25, 50, 100.
    pub fn standard() -> Self {
        Self {
            costs: [10, 25, 50, 100],
        }
    }

    /// Build a custom schedule; costs must be strictly increasing.
    pub fn new(costs: [u64; 4]) -> Result<Self, DomainError> {
        if !costs.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(DomainError::configuration(format!(
                "upgrade costs must be strictly increasing, got {:?}",
                costs
            )));
        }
        Ok(Self { costs })
    }

    /// Cost of upgrading *from* the given level.
    ///
    /// Asking for the max level is a caller error - the ledger checks the
    /// ceiling first.
    pub fn cost_for(&self, level: RodLevel) -> Result<u64, DomainError> {
        if level.is_max() {
            return Err(DomainError::constraint(format!(
                "no upgrade cost at max level ({})",
                level
            )));
        }
        Ok(self.costs[usize::from(level.get() - 1)])
    }

    /// The cheapest step; bounds how many upgrades a balance can buy.
    pub fn min_cost(&self) -> u64 {
        self.costs[0]
    }
}

impl Default for UpgradeCostSchedule {
    fn default() -> Self {
        Self::standard()
    }
}
