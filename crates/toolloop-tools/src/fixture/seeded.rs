//! In-memory number table
//!
//! Filled once at startup with pseudo-random values, or from fixed pairs
//! in tests. Never mutated afterwards.

use std::collections::HashMap;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::NumberTable;

/// Exclusive upper bound for generated values
const VALUE_CEILING: u32 = 100;

/// Default number of keys (1..=25)
pub const DEFAULT_KEY_COUNT: u32 = 25;

/// Number table backed by a `HashMap`
#[derive(Clone, Debug, Default)]
pub struct SeededNumberTable {
    values: HashMap<u32, u32>,
}

impl SeededNumberTable {
    /// Keys `1..=count`, each mapped to a random value in `0..100`
    pub fn random(count: u32) -> Self {
        Self::fill(count, &mut rand::thread_rng())
    }

    /// Like [`SeededNumberTable::random`] but reproducible
    pub fn with_seed(count: u32, seed: u64) -> Self {
        Self::fill(count, &mut StdRng::seed_from_u64(seed))
    }

    /// Fixed table for tests
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    fn fill(count: u32, rng: &mut impl Rng) -> Self {
        let values = (1..=count)
            .map(|key| (key, rng.gen_range(0..VALUE_CEILING)))
            .collect();
        tracing::debug!(keys = count, "Filled number table");
        Self { values }
    }
}

#[async_trait]
impl NumberTable for SeededNumberTable {
    async fn get(&self, key: u32) -> Option<u32> {
        self.values.get(&key).copied()
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn name(&self) -> &str {
        "seeded"
    }
}
