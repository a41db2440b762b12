//! Lemon trees: the source of lemon sizes.
//!
//! The machine never draws random numbers itself. It asks a [`LemonTree`]
//! for the next lemon, so tests and demos can plug in a seeded or scripted
//! tree.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Smallest lemon the default tree grows.
pub const MIN_LEMON_SIZE: i32 = 2;

/// Largest lemon the default tree grows.
pub const MAX_LEMON_SIZE: i32 = 4;

/// Capability that picks a lemon and reports how many squeezes it needs.
pub trait LemonTree {
    fn pick(&mut self) -> i32;
}

impl<T: LemonTree + ?Sized> LemonTree for Box<T> {
    fn pick(&mut self) -> i32 {
        (**self).pick()
    }
}

/// Tree that draws sizes uniformly from an inclusive range.
///
/// # Example
///
/// ```rust
/// use lemonade::core::{LemonTree, RandomLemonTree};
///
/// let mut tree = RandomLemonTree::seeded(7);
/// let size = tree.pick();
/// assert!((2..=4).contains(&size));
/// ```
#[derive(Debug, Clone)]
pub struct RandomLemonTree<R: Rng> {
    rng: R,
    sizes: RangeInclusive<i32>,
}

impl RandomLemonTree<StdRng> {
    /// Tree seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic tree; the same seed yields the same lemons.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomLemonTree<R> {
    /// Tree over the default size range using the given generator.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            sizes: MIN_LEMON_SIZE..=MAX_LEMON_SIZE,
        }
    }

    /// Replace the size range. An empty range falls back to its lower bound.
    pub fn with_sizes(mut self, sizes: RangeInclusive<i32>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Inclusive range the tree draws from.
    pub fn sizes(&self) -> &RangeInclusive<i32> {
        &self.sizes
    }
}

impl<R: Rng> LemonTree for RandomLemonTree<R> {
    fn pick(&mut self) -> i32 {
        if self.sizes.is_empty() {
            return *self.sizes.start();
        }
        self.rng.gen_range(self.sizes.clone())
    }
}

/// Tree that hands out a scripted sequence of sizes, cycling at the end.
#[derive(Debug, Clone)]
pub struct FixedLemonTree {
    sizes: Vec<i32>,
    next: usize,
}

impl FixedLemonTree {
    /// Tree that always yields `size`.
    pub fn always(size: i32) -> Self {
        Self::sequence(vec![size])
    }

    /// Tree that yields `sizes` in order. An empty script yields the
    /// smallest default size.
    pub fn sequence(sizes: Vec<i32>) -> Self {
        Self { sizes, next: 0 }
    }
}

impl LemonTree for FixedLemonTree {
    fn pick(&mut self) -> i32 {
        if self.sizes.is_empty() {
            return MIN_LEMON_SIZE;
        }
        let size = self.sizes[self.next % self.sizes.len()];
        self.next = (self.next + 1) % self.sizes.len();
        size
    }
}
