//! RNG module - deterministic shuffling for the quiz deck
//!
//! A simple LCG drives a Fisher-Yates shuffle of the catalog. Seeded
//! explicitly in tests; production play seeds from `entropy_seed()`.

use arrayvec::ArrayVec;

use crate::core::catalog::{Muscle, CATALOG};
use crate::types::CATALOG_LEN;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current RNG state (for restarting a session with the same deck order)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// A shuffled copy of the catalog. The catalog itself is never mutated.
pub fn shuffled_catalog(rng: &mut SimpleRng) -> ArrayVec<Muscle, CATALOG_LEN> {
    let mut deck = ArrayVec::from(CATALOG);
    rng.shuffle(&mut deck);
    deck
}

/// Derive a non-deterministic seed for production play.
pub fn entropy_seed() -> u32 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    nanos ^ std::process::id().rotate_left(16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_coerced() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn shuffled_catalog_is_a_permutation() {
        let mut rng = SimpleRng::new(7);
        let deck = shuffled_catalog(&mut rng);

        assert_eq!(deck.len(), CATALOG.len());
        for m in CATALOG.iter() {
            assert_eq!(deck.iter().filter(|d| d.id == m.id).count(), 1);
        }
    }

    #[test]
    fn shuffled_catalog_varies_with_seed() {
        let mut rng1 = SimpleRng::new(1);
        let mut rng2 = SimpleRng::new(2);
        let a = shuffled_catalog(&mut rng1);
        let b = shuffled_catalog(&mut rng2);

        // Not a hard guarantee for arbitrary seeds, but these two differ.
        assert!(a.iter().zip(b.iter()).any(|(x, y)| x.id != y.id));
    }
}
