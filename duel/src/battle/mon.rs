use duel_data::{
    BoostTable,
    Stat,
    StatTable,
    Status,
    Type,
};

use crate::{
    battle::MonHandle,
    common::Id,
    effect::{
        Effect,
        EffectMap,
    },
};

/// A move known by a Mon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSlot {
    pub id: Id,
    pub name: String,
    pub pp: u8,
    pub max_pp: u8,
}

/// A single creature in a battle.
///
/// A Mon is fainted when its HP reaches 0. It keeps its slot as the active Mon until the faint is
/// processed.
#[derive(Debug, Clone)]
pub struct Mon {
    pub name: String,
    pub species: Id,
    pub side: usize,
    pub position: usize,
    pub level: u8,
    pub types: Vec<Type>,
    pub stats: StatTable,
    pub max_hp: u16,
    pub hp: u16,
    pub boosts: BoostTable,
    pub status: Option<Status>,
    pub active: bool,
    pub moves: Vec<MoveSlot>,
    pub ability: Id,
    pub item: Option<Id>,
    pub effects: EffectMap,
    /// The status effect instance, held while the Mon is out of battle.
    pub(crate) stashed_status: Option<Box<dyn Effect>>,
    /// The Mon must be switched out before the next action.
    pub must_switch: bool,
    pub last_move: Option<Id>,
    /// Turns since the Mon last switched in.
    pub active_turns: u32,
}

impl Mon {
    pub fn handle(&self) -> MonHandle {
        MonHandle::new(self.side, self.position)
    }

    pub fn fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn has_type(&self, typ: Type) -> bool {
        self.types.contains(&typ)
    }

    /// The stat without boosts or modifiers.
    pub fn stat(&self, stat: Stat) -> u16 {
        match stat {
            Stat::HP => self.max_hp,
            _ => self.stats.get(stat),
        }
    }

    pub fn move_slot(&self, id: &Id) -> Option<&MoveSlot> {
        self.moves.iter().find(|slot| slot.id == *id)
    }

    pub(crate) fn move_slot_mut(&mut self, id: &Id) -> Option<&mut MoveSlot> {
        self.moves.iter_mut().find(|slot| slot.id == *id)
    }

    /// Moves with PP remaining.
    pub fn usable_moves(&self) -> Vec<Id> {
        self.moves
            .iter()
            .filter(|slot| slot.pp > 0)
            .map(|slot| slot.id.clone())
            .collect()
    }

    /// Identifier for battle logs.
    pub fn log_id(&self) -> String {
        format!("mon:{},{}", self.name, self.side)
    }

    /// HP fraction for battle logs.
    pub fn health(&self) -> String {
        format!("{}/{}", self.hp, self.max_hp)
    }
}
