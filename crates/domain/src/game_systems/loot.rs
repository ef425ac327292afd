//! Probability-weighted loot table
//!
//! Each rod level has fixed percentage weights over {epic, rare, normal};
//! whatever is left of 100 is the escape probability. Cast quality scales
//! the epic and rare weights only. The draw walks the buckets in the fixed
//! order epic, rare, normal so boosted rare/epic odds are never starved by
//! the normal bucket.

use crate::error::DomainError;
use crate::value_objects::{CastQuality, CatchOutcome, CatchTier, RodLevel};

/// Base percentage weights for one rod level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootWeights {
    pub normal: f64,
    pub rare: f64,
    pub epic: f64,
}

impl LootWeights {
    fn validate(&self) -> Result<(), DomainError> {
        for (name, weight) in [
            ("normal", self.normal),
            ("rare", self.rare),
            ("epic", self.epic),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(DomainError::configuration(format!(
                    "loot weight '{}' must be finite and non-negative, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }

    /// Combined chance of a rare-or-better catch under a given quality.
    fn boosted_rare_or_epic(&self, quality: CastQuality) -> f64 {
        (self.epic + self.rare) * quality.bonus_factor()
    }
}

/// Loot table over all rod levels.
#[derive(Debug, Clone)]
pub struct LootTable {
    // Indexed by rod level - 1.
    weights: [LootWeights; 5],
}

impl LootTable {
    /// Build a table from per-level weights, lowest level first.
    ///
    /// Rejects negative or non-finite weights. Boosted weights exceeding
    /// 100 are allowed; they just make escapes (and eventually normals)
    /// unreachable, which is a legitimate extreme tuning.
    pub fn new(weights: [LootWeights; 5]) -> Result<Self, DomainError> {
        for w in &weights {
            w.validate()?;
        }
        Ok(Self { weights })
    }

    /// The shipped tuning.
    pub fn standard() -> Self {
        Self {
            weights: [
                LootWeights { normal: 80.0, rare: 2.0, epic: 1.0 },
                LootWeights { normal: 75.0, rare: 4.0, epic: 2.0 },
                LootWeights { normal: 70.0, rare: 6.0, epic: 3.0 },
                LootWeights { normal: 65.0, rare: 8.0, epic: 4.0 },
                LootWeights { normal: 60.0, rare: 10.0, epic: 5.0 },
            ],
        }
    }

    pub fn weights_for(&self, level: RodLevel) -> LootWeights {
        self.weights[usize::from(level.get() - 1)]
    }

    /// Resolve one draw.
    ///
    /// `roll` is a uniform value in [0, 100) supplied by the caller's
    /// random source. Buckets accumulate in the order epic, rare, normal;
    /// a roll past the total is an escape.
    pub fn evaluate(&self, level: RodLevel, quality: CastQuality, roll: f64) -> CatchOutcome {
        let weights = self.weights_for(level);
        let bonus = quality.bonus_factor();

        let epic_bound = weights.epic * bonus;
        let rare_bound = epic_bound + weights.rare * bonus;
        let normal_bound = rare_bound + weights.normal;

        if roll < epic_bound {
            CatchOutcome::Caught(CatchTier::Epic)
        } else if roll < rare_bound {
            CatchOutcome::Caught(CatchTier::Rare)
        } else if roll < normal_bound {
            CatchOutcome::Caught(CatchTier::Normal)
        } else {
            CatchOutcome::Escaped
        }
    }
}

impl Default for LootTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn level(n: u8) -> RodLevel {
        RodLevel::new(n).expect("valid level")
    }

    #[test]
    fn test_pinned_outcomes_level_one_normal_quality() {
        // Level 1: epic 1, rare 2, normal 80 -> bounds 1 / 3 / 83.
        let table = LootTable::standard();
        let l1 = level(1);
        let q = CastQuality::Normal;

        assert_eq!(table.evaluate(l1, q, 0.0), CatchOutcome::Caught(CatchTier::Epic));
        assert_eq!(table.evaluate(l1, q, 0.99), CatchOutcome::Caught(CatchTier::Epic));
        assert_eq!(table.evaluate(l1, q, 1.0), CatchOutcome::Caught(CatchTier::Rare));
        assert_eq!(table.evaluate(l1, q, 2.99), CatchOutcome::Caught(CatchTier::Rare));
        assert_eq!(table.evaluate(l1, q, 3.0), CatchOutcome::Caught(CatchTier::Normal));
        assert_eq!(table.evaluate(l1, q, 82.99), CatchOutcome::Caught(CatchTier::Normal));
        assert_eq!(table.evaluate(l1, q, 83.0), CatchOutcome::Escaped);
        assert_eq!(table.evaluate(l1, q, 99.99), CatchOutcome::Escaped);
    }

    #[test]
    fn test_quality_scales_rare_and_epic_but_not_normal() {
        // Level 5 perfect: epic 5*1.5=7.5, rare 10*1.5=15 -> bounds 7.5 / 22.5 / 82.5.
        let table = LootTable::standard();
        let l5 = level(5);
        let q = CastQuality::Perfect;

        assert_eq!(table.evaluate(l5, q, 7.49), CatchOutcome::Caught(CatchTier::Epic));
        assert_eq!(table.evaluate(l5, q, 7.5), CatchOutcome::Caught(CatchTier::Rare));
        assert_eq!(table.evaluate(l5, q, 22.49), CatchOutcome::Caught(CatchTier::Rare));
        assert_eq!(table.evaluate(l5, q, 22.5), CatchOutcome::Caught(CatchTier::Normal));
        assert_eq!(table.evaluate(l5, q, 82.49), CatchOutcome::Caught(CatchTier::Normal));
        assert_eq!(table.evaluate(l5, q, 82.5), CatchOutcome::Escaped);
    }

    #[test]
    fn test_higher_level_strictly_increases_rare_or_epic() {
        let table = LootTable::standard();
        for quality in [CastQuality::Normal, CastQuality::Good, CastQuality::Perfect] {
            let mut previous = -1.0;
            for rod in RodLevel::all() {
                let boosted = table.weights_for(rod).boosted_rare_or_epic(quality);
                assert!(
                    boosted > previous,
                    "rare+epic chance must rise with level (quality {quality})"
                );
                previous = boosted;
            }
        }
    }

    #[test]
    fn test_better_quality_strictly_increases_rare_or_epic() {
        let table = LootTable::standard();
        for rod in RodLevel::all() {
            let weights = table.weights_for(rod);
            let normal = weights.boosted_rare_or_epic(CastQuality::Normal);
            let good = weights.boosted_rare_or_epic(CastQuality::Good);
            let perfect = weights.boosted_rare_or_epic(CastQuality::Perfect);
            assert!(good > normal && perfect > good);
        }
    }

    #[test]
    fn test_draws_converge_to_configured_distribution() {
        // Level 3 good quality: epic 3.75, rare 7.5, normal 70, escape 18.75.
        let table = LootTable::standard();
        let l3 = level(3);
        let q = CastQuality::Good;
        let mut rng = StdRng::seed_from_u64(42);

        const N: u32 = 200_000;
        let mut counts = [0u32; 4]; // epic, rare, normal, escaped
        for _ in 0..N {
            let roll: f64 = rng.gen_range(0.0..100.0);
            match table.evaluate(l3, q, roll) {
                CatchOutcome::Caught(CatchTier::Epic) => counts[0] += 1,
                CatchOutcome::Caught(CatchTier::Rare) => counts[1] += 1,
                CatchOutcome::Caught(CatchTier::Normal) => counts[2] += 1,
                CatchOutcome::Escaped => counts[3] += 1,
            }
        }

        let pct = |c: u32| f64::from(c) * 100.0 / f64::from(N);
        assert!((pct(counts[0]) - 3.75).abs() < 0.5);
        assert!((pct(counts[1]) - 7.5).abs() < 0.5);
        assert!((pct(counts[2]) - 70.0).abs() < 0.75);
        assert!((pct(counts[3]) - 18.75).abs() < 0.75);
    }

    #[test]
    fn test_extreme_bonus_may_starve_normal_and_escape() {
        // Rare+epic boosted past 100 is allowed, not an error.
        let table = LootTable::new([
            LootWeights { normal: 10.0, rare: 60.0, epic: 50.0 },
            LootWeights { normal: 10.0, rare: 60.0, epic: 50.0 },
            LootWeights { normal: 10.0, rare: 60.0, epic: 50.0 },
            LootWeights { normal: 10.0, rare: 60.0, epic: 50.0 },
            LootWeights { normal: 10.0, rare: 60.0, epic: 50.0 },
        ])
        .expect("table accepts >100 totals");

        let outcome = table.evaluate(level(1), CastQuality::Perfect, 99.99);
        assert!(matches!(
            outcome,
            CatchOutcome::Caught(CatchTier::Epic) | CatchOutcome::Caught(CatchTier::Rare)
        ));
    }

    #[test]
    fn test_negative_weight_is_configuration_error() {
        let mut weights = [LootWeights { normal: 80.0, rare: 2.0, epic: 1.0 }; 5];
        weights[2].rare = -1.0;
        let err = LootTable::new(weights).expect_err("negative weight");
        assert!(matches!(err, DomainError::Configuration(_)));
    }
}
