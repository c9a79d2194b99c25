//! Seeded random stream used by one generation pass.
//!
//! Every draw goes through the one `ChaCha8Rng` in a fixed call order, which
//! is what makes room layouts a pure function of their seed.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub(super) struct LayoutRng {
    inner: ChaCha8Rng,
}

impl LayoutRng {
    pub(super) fn from_seed(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub(super) fn range_u32(&mut self, min_value: u32, max_value: u32) -> u32 {
        debug_assert!(min_value <= max_value);
        let span = u64::from(max_value - min_value) + 1;
        min_value + (self.inner.next_u64() % span) as u32
    }

    pub(super) fn range_i32(&mut self, min_value: i32, max_value: i32) -> i32 {
        debug_assert!(min_value <= max_value);
        let span = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
        min_value + (self.inner.next_u64() % span) as i32
    }

    /// Index into a weight table; higher weight means proportionally more
    /// likely. Consumes exactly one draw regardless of the outcome.
    pub(super) fn weighted_index(&mut self, weights: &[u32]) -> usize {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        debug_assert!(total > 0);
        let mut roll = self.inner.next_u64() % total;
        for (index, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if roll < weight {
                return index;
            }
            roll -= weight;
        }
        weights.len() - 1
    }

    pub(super) fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = (self.inner.next_u64() % (i as u64 + 1)) as usize;
            items.swap(i, j);
        }
    }
}
