use crate::{
    battle::Mon,
    effect::EffectMap,
};

/// One player's half of the battle.
#[derive(Debug, Clone)]
pub struct Side {
    pub index: usize,
    pub name: String,
    pub mons: Vec<Mon>,
    /// Position of the active Mon in `mons`.
    pub active: Option<usize>,
    pub effects: EffectMap,
}

impl Side {
    pub fn new(index: usize, name: String, mons: Vec<Mon>) -> Self {
        Self {
            index,
            name,
            mons,
            active: None,
            effects: EffectMap::new(),
        }
    }

    pub fn active_mon(&self) -> Option<&Mon> {
        self.mons.get(self.active?)
    }

    pub fn active_mon_mut(&mut self) -> Option<&mut Mon> {
        self.mons.get_mut(self.active?)
    }

    /// Number of Mons that have not fainted.
    pub fn remaining(&self) -> usize {
        self.mons.iter().filter(|mon| !mon.fainted()).count()
    }

    /// Positions of Mons that can be switched in.
    pub fn switch_options(&self) -> Vec<usize> {
        self.mons
            .iter()
            .enumerate()
            .filter(|(position, mon)| !mon.fainted() && Some(*position) != self.active)
            .map(|(position, _)| position)
            .collect()
    }

    /// Whether the active slot must be filled before the battle can continue.
    pub fn needs_switch(&self) -> bool {
        match self.active_mon() {
            None => !self.switch_options().is_empty(),
            Some(mon) => mon.must_switch && !self.switch_options().is_empty(),
        }
    }
}
