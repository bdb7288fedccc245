pub mod rand_util;

use std::any::Any;

use rand::Rng;

/// A pseudo-random number generator that can be deterministically replayed.
///
/// Every random decision in a battle (speed ties, accuracy, critical hits, damage rolls, secondary
/// effects) draws from a single generator, so replaying the same seed against the same decisions
/// reproduces the same battle.
pub trait PseudoRandomNumberGenerator: Send + Sync {
    /// Returns the initial seed the generator was created with.
    fn initial_seed(&self) -> u64;

    /// Returns the next integer in the sequence.
    fn next(&mut self) -> u64;

    /// Clones the generator, including its position in the sequence.
    fn clone_box(&self) -> Box<dyn PseudoRandomNumberGenerator>;

    /// Mutable cast to [`Any`] for testing.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn PseudoRandomNumberGenerator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A linear congruential generator.
#[derive(Debug, Clone)]
pub struct RealPseudoRandomNumberGenerator {
    initial_seed: u64,
    seed: u64,
}

impl RealPseudoRandomNumberGenerator {
    /// Creates a new generator.
    ///
    /// Generators created with the same seed produce the same sequence. A missing seed is filled
    /// in from the thread-local RNG.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self {
            initial_seed: seed,
            seed,
        }
    }

    fn next_seed(seed: u64) -> u64 {
        const A: u64 = 0x5D588B656C078965;
        const C: u64 = 0x0000000000269EC3;
        seed.wrapping_mul(A).wrapping_add(C)
    }
}

impl PseudoRandomNumberGenerator for RealPseudoRandomNumberGenerator {
    fn initial_seed(&self) -> u64 {
        self.initial_seed
    }

    fn next(&mut self) -> u64 {
        self.seed = Self::next_seed(self.seed);
        // Lower bits of an LCG have short periods.
        self.seed >> 32
    }

    fn clone_box(&self) -> Box<dyn PseudoRandomNumberGenerator> {
        Box::new(self.clone())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod prng_test {
    use crate::{
        PseudoRandomNumberGenerator,
        RealPseudoRandomNumberGenerator,
    };

    #[test]
    fn stores_initial_seed() {
        assert_eq!(
            RealPseudoRandomNumberGenerator::new(Some(4242)).initial_seed(),
            4242
        );
    }

    #[test]
    fn same_seed_replays_sequence() {
        let mut a = RealPseudoRandomNumberGenerator::new(Some(99));
        let mut b = RealPseudoRandomNumberGenerator::new(Some(99));
        for _ in 0..100 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn clone_continues_from_same_position() {
        let mut prng = RealPseudoRandomNumberGenerator::new(Some(5));
        prng.next();
        prng.next();
        let mut clone = prng.clone_box();
        for _ in 0..10 {
            assert_eq!(prng.next(), clone.next());
        }
        assert_eq!(clone.initial_seed(), 5);
    }
}
