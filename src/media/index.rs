//! Sources of playlist indices for rotation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws the next playlist index.
///
/// Implementations should return a value in `0..len`; callers still reduce
/// the result modulo `len`, so an out-of-range draw can never produce an
/// invalid selection.
pub trait IndexSource: Send {
    fn next_index(&mut self, len: usize) -> usize;
}

/// Uniform draws with replacement from a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomIndex<R = StdRng> {
    rng: R,
}

impl RandomIndex<StdRng> {
    /// Generator seeded from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R> RandomIndex<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> IndexSource for RandomIndex<R> {
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// Test support: makes rotation deterministic in unit and integration tests.
/// Real rotation uses [`RandomIndex`].
#[derive(Debug, Clone)]
pub struct ScriptedIndices {
    draws: Vec<usize>,
    position: usize,
}

impl ScriptedIndices {
    pub fn new(draws: impl Into<Vec<usize>>) -> Self {
        Self {
            draws: draws.into(),
            position: 0,
        }
    }
}

impl IndexSource for ScriptedIndices {
    fn next_index(&mut self, _len: usize) -> usize {
        if self.draws.is_empty() {
            return 0;
        }
        let draw = self.draws[self.position % self.draws.len()];
        self.position = self.position.wrapping_add(1);
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_draws_are_reproducible_and_in_range() {
        let mut a = RandomIndex::seeded(42);
        let mut b = RandomIndex::seeded(42);
        let first: Vec<usize> = (0..32).map(|_| a.next_index(5)).collect();
        let second: Vec<usize> = (0..32).map(|_| b.next_index(5)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|index| *index < 5));
    }

    #[test]
    fn single_item_always_draws_zero() {
        let mut source = RandomIndex::from_entropy();
        for _ in 0..16 {
            assert_eq!(source.next_index(1), 0);
        }
    }

    #[test]
    fn scripted_indices_cycle() {
        let mut source = ScriptedIndices::new(vec![2, 0]);
        let draws: Vec<usize> = (0..5).map(|_| source.next_index(4)).collect();
        assert_eq!(draws, vec![2, 0, 2, 0, 2]);
    }

    #[test]
    fn empty_script_draws_zero() {
        let mut source = ScriptedIndices::new(Vec::new());
        assert_eq!(source.next_index(3), 0);
    }
}
