use std::{
    any::Any,
    collections::hash_map::Entry,
};

use ahash::{
    HashMap,
    HashMapExt,
};
use duel::battle::Battle;
use duel_prng::{
    PseudoRandomNumberGenerator,
    RealPseudoRandomNumberGenerator,
};

/// A controlled random number generator, for tests that need fine-grained control over battle RNG.
#[derive(Debug, Clone)]
pub struct ControlledRandomNumberGenerator {
    count: usize,
    fake_values: HashMap<usize, u64>,
    real: RealPseudoRandomNumberGenerator,
}

impl ControlledRandomNumberGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            count: 0,
            fake_values: HashMap::new(),
            real: RealPseudoRandomNumberGenerator::new(seed),
        }
    }

    pub fn sequence_count(&self) -> usize {
        self.count
    }

    pub fn insert_fake_value(&mut self, count: usize, value: u64) {
        self.fake_values.insert(count, value);
    }

    pub fn insert_fake_values<I>(&mut self, iterable: I)
    where
        I: IntoIterator<Item = (usize, u64)>,
    {
        self.fake_values.extend(iterable);
    }

    /// Inserts fake values at positions relative to the draws made so far, where `1` is the next
    /// draw.
    pub fn insert_fake_values_relative_to_sequence_count<I>(&mut self, iterable: I)
    where
        I: IntoIterator<Item = (usize, u64)>,
    {
        let count = self.count;
        self.fake_values.extend(
            iterable
                .into_iter()
                .map(|(offset, value)| (offset + count, value)),
        );
    }
}

impl PseudoRandomNumberGenerator for ControlledRandomNumberGenerator {
    fn initial_seed(&self) -> u64 {
        self.real.initial_seed()
    }

    fn next(&mut self) -> u64 {
        // Roll the underlying generator to keep the sequence consistent, even if the value is
        // replaced.
        let next = self.real.next();
        self.count += 1;
        match self.fake_values.entry(self.count) {
            Entry::Occupied(fake_entry) => fake_entry.remove(),
            Entry::Vacant(_) => next,
        }
    }

    fn clone_box(&self) -> Box<dyn PseudoRandomNumberGenerator> {
        Box::new(self.clone())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub fn get_controlled_rng_for_battle(
    battle: &mut Battle,
) -> Option<&mut ControlledRandomNumberGenerator> {
    battle
        .prng()
        .as_any_mut()
        .downcast_mut::<ControlledRandomNumberGenerator>()
}
