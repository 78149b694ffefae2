//! Deterministic random number generation for board shuffles.
//!
//! A session owns one `GameRng` and draws every deal from it, so a pinned
//! seed reproduces the same sequence of boards. The stream position can be
//! captured with [`GameRng::state`] (it is part of every session snapshot)
//! and resumed with [`GameRng::from_state`] to replay the next deal.
//!
//! ```
//! use memory_match::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//!
//! let mut left: Vec<u32> = (0..12).collect();
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded ChaCha8 stream used by the board generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the thread RNG, for configs without a pinned seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a stream for a named purpose. Same seed and name, same stream.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform in-place permutation (Fisher–Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Where the stream currently stands.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream at a captured position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.inner.set_word_pos(state.word_pos);
        rng
    }
}

/// Captured stream position: the seed plus the ChaCha8 word counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}
