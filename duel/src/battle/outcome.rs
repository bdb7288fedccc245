use duel_data::{
    MoveCategory,
    Type,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    battle::MonHandle,
    common::Id,
    effect::EffectSource,
};

/// The result of calculating or applying damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Damage(u16),
    Fail,
}

impl DamageOutcome {
    /// The amount of damage, with failure counting as none.
    pub fn amount(&self) -> u16 {
        match self {
            Self::Damage(damage) => *damage,
            Self::Fail => 0,
        }
    }

    pub fn failed(&self) -> bool {
        matches!(self, Self::Fail)
    }
}

/// The result of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Success,
    Failed,
    Missed,
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Win(usize),
    Tie,
}

/// What caused damage to be dealt.
#[derive(Debug, Clone, PartialEq)]
pub enum DamageCause {
    /// An attacking move.
    Move {
        user: MonHandle,
        move_id: Id,
        category: MoveCategory,
        move_type: Type,
        contact: bool,
    },
    /// The Mon hit itself in confusion.
    SelfHit,
    /// Recoil from the Mon's own move.
    Recoil,
    /// An effect, such as a weather, status, or hazard.
    Effect(EffectSource),
}

impl DamageCause {
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }

    /// Whether the damage is indirect.
    pub fn is_indirect(&self) -> bool {
        matches!(self, Self::Recoil | Self::Effect(_))
    }

    /// The user of the move that caused the damage.
    pub fn attacker(&self) -> Option<MonHandle> {
        match self {
            Self::Move { user, .. } => Some(*user),
            _ => None,
        }
    }
}
