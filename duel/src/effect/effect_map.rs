use indexmap::IndexMap;

use crate::effect::{
    Effect,
    EffectSource,
};

/// A single attached effect.
///
/// The effect is taken out of its slot while one of its own hooks runs, so `effect` is empty for
/// effects that are in flight.
#[derive(Debug, Clone)]
pub struct EffectSlot {
    pub(crate) effect: Option<Box<dyn Effect>>,
    /// Remaining turns, if limited.
    pub duration: Option<u8>,
    /// Battle-wide attach order.
    pub order: u64,
}

impl EffectSlot {
    pub(crate) fn new(effect: Box<dyn Effect>, duration: Option<u8>, order: u64) -> Self {
        Self {
            effect: Some(effect),
            duration,
            order,
        }
    }

    pub fn effect(&self) -> Option<&dyn Effect> {
        self.effect.as_deref()
    }

    /// Whether the effect is currently running one of its hooks.
    pub fn in_flight(&self) -> bool {
        self.effect.is_none()
    }
}

/// The effects attached to a single host, at most one per [`EffectSource`].
///
/// Iteration follows insertion order.
#[derive(Debug, Default, Clone)]
pub struct EffectMap {
    slots: IndexMap<EffectSource, EffectSlot>,
}

impl EffectMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, source: &EffectSource) -> bool {
        self.slots.contains_key(source)
    }

    /// Returns the effect for the source, unless it is missing or in flight.
    pub fn get(&self, source: &EffectSource) -> Option<&dyn Effect> {
        self.slots.get(source).and_then(|slot| slot.effect())
    }

    pub fn get_mut(&mut self, source: &EffectSource) -> Option<&mut (dyn Effect + 'static)> {
        self.slots
            .get_mut(source)
            .and_then(|slot| slot.effect.as_deref_mut())
    }

    /// Returns the concrete effect for the source.
    pub fn get_as<T>(&self, source: &EffectSource) -> Option<&T>
    where
        T: 'static,
    {
        self.get(source)
            .and_then(|effect| effect.as_any().downcast_ref::<T>())
    }

    pub fn get_as_mut<T>(&mut self, source: &EffectSource) -> Option<&mut T>
    where
        T: 'static,
    {
        self.get_mut(source)
            .and_then(|effect| effect.as_any_mut().downcast_mut::<T>())
    }

    pub fn slot(&self, source: &EffectSource) -> Option<&EffectSlot> {
        self.slots.get(source)
    }

    pub(crate) fn slot_mut(&mut self, source: &EffectSource) -> Option<&mut EffectSlot> {
        self.slots.get_mut(source)
    }

    pub(crate) fn insert(&mut self, source: EffectSource, slot: EffectSlot) -> Option<EffectSlot> {
        self.slots.insert(source, slot)
    }

    pub(crate) fn remove(&mut self, source: &EffectSource) -> Option<EffectSlot> {
        self.slots.shift_remove(source)
    }

    /// All attached sources, in attach order.
    pub fn sources(&self) -> Vec<EffectSource> {
        self.slots.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EffectSource, &EffectSlot)> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
