//! Seeded random source shared by the deck, spawner and particles.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::ops::RangeInclusive;

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed drawn from the OS; used when no `--seed` is given.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::thread_rng().gen_range(0..=u64::MAX))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Uniform pick; `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        self.rng.gen_range(lo..=hi)
    }

    pub fn range_u32(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.gen_range(range)
    }

    pub fn range_i32(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.rng.gen_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RngState::from_seed(7);
        let mut b = RngState::from_seed(7);
        for _ in 0..32 {
            assert_eq!(a.range_u32(0..=1000), b.range_u32(0..=1000));
        }
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut r = RngState::from_seed(1);
        let empty: [u8; 0] = [];
        assert!(r.choose(&empty).is_none());
    }
}
