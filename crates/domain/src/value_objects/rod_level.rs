//! Rod level value object
//!
//! The upgradeable equipment level. Bounds loot odds and is always within
//! [1, 5]; the type makes an out-of-range level unrepresentable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A fishing rod level in [1, 5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RodLevel(u8);

impl RodLevel {
    pub const MIN: RodLevel = RodLevel(1);
    pub const MAX: RodLevel = RodLevel(5);

    /// Create a rod level, rejecting values outside [1, 5].
    pub fn new(level: u8) -> Result<Self, DomainError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&level) {
            return Err(DomainError::validation(format!(
                "rod level must be between {} and {}, got {}",
                Self::MIN.0,
                Self::MAX.0,
                level
            )));
        }
        Ok(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_max(self) -> bool {
        self.0 == Self::MAX.0
    }

    /// The next level up. Errors at the ceiling; callers check `is_max`
    /// before computing upgrade costs.
    pub fn next(self) -> Result<Self, DomainError> {
        if self.is_max() {
            return Err(DomainError::constraint(format!(
                "rod already at max level ({})",
                Self::MAX.0
            )));
        }
        Ok(Self(self.0 + 1))
    }

    /// All levels, lowest first.
    pub fn all() -> impl Iterator<Item = RodLevel> {
        (Self::MIN.0..=Self::MAX.0).map(RodLevel)
    }
}

impl Default for RodLevel {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for RodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for RodLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RodLevel> for u8 {
    fn from(value: RodLevel) -> Self {
        value.0
    }
}
