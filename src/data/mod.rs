//! Deterministic benchmark inputs
//!
//! Seeded so repeated runs search identical data and timings stay comparable.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 3;

/// The values `0..size` in a seeded random order
pub fn random_permutation(size: usize, seed: u64) -> Result<Vec<i32>> {
    let upper = i32::try_from(size)
        .with_context(|| format!("permutation size {size} does not fit in i32"))?;

    let mut values: Vec<i32> = (0..upper).collect();
    values.shuffle(&mut StdRng::seed_from_u64(seed));
    Ok(values)
}

/// `size` floats drawn uniformly from `[0, 1)`
pub fn random_unit_floats(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size).map(|_| rng.random::<f64>()).collect()
}

/// Which value a find benchmark looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// The first element, best case for every variant
    First,
    /// The element halfway through
    Middle,
    /// The final element, worst case that still matches
    #[default]
    Last,
    /// A value not present, forcing a full scan
    Absent,
}

impl Target {
    /// The needle to search `data` for
    ///
    /// Permutations only hold non-negative values, so `-1` is never present.
    pub fn needle(self, data: &[i32]) -> i32 {
        let picked = match self {
            Target::First => data.first(),
            Target::Middle => data.get(data.len() / 2),
            Target::Last => data.last(),
            Target::Absent => None,
        };
        picked.copied().unwrap_or(-1)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Target::First => "first",
            Target::Middle => "middle",
            Target::Last => "last",
            Target::Absent => "absent",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_holds_every_value_once() {
        let mut values = random_permutation(1_000, DEFAULT_SEED).unwrap();
        assert_eq!(values.len(), 1_000);
        values.sort_unstable();
        assert!(values.iter().copied().eq(0..1_000));
    }

    #[test]
    fn test_permutation_is_seeded() {
        let a = random_permutation(500, 7).unwrap();
        let b = random_permutation(500, 7).unwrap();
        let c = random_permutation(500, 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_permutation_size_overflow() {
        let too_big = i32::MAX as usize + 1;
        assert!(random_permutation(too_big, DEFAULT_SEED).is_err());
    }

    #[test]
    fn test_unit_floats_in_range() {
        let values = random_unit_floats(2_000, DEFAULT_SEED);
        assert_eq!(values.len(), 2_000);
        assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
        assert_eq!(values, random_unit_floats(2_000, DEFAULT_SEED));
    }

    #[test]
    fn test_target_needles() {
        let data = [4, 0, 3, 1, 2];
        assert_eq!(Target::First.needle(&data), 4);
        assert_eq!(Target::Middle.needle(&data), 3);
        assert_eq!(Target::Last.needle(&data), 2);
        assert_eq!(Target::Absent.needle(&data), -1);
        assert_eq!(Target::Last.needle(&[]), -1);
    }
}
