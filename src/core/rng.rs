//! Deterministic random number generation.
//!
//! Every source of randomness in a game (deck shuffles, kingdom sampling,
//! AI seat assignment) draws from a single `GameRng`, so two engines built
//! with the same seed and fed the same decisions play identical games.
//!
//! ```
//! use rust_dominion::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut deck_a = vec![1, 2, 3, 4, 5];
//! let mut deck_b = deck_a.clone();
//! a.shuffle(&mut deck_a);
//! b.shuffle(&mut deck_b);
//! assert_eq!(deck_a, deck_b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable game RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place (uniform permutation).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Remove and return a uniformly chosen element.
    pub fn take_random<T>(&mut self, items: &mut Vec<T>) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let index = self.gen_range_usize(0..items.len());
        Some(items.remove(index))
    }

    /// Choose `count` distinct elements uniformly (or all, if fewer exist).
    pub fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        let mut pool = items.to_vec();
        self.shuffle(&mut pool);
        pool.truncate(count);
        pool
    }
}
