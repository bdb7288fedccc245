use duel_data::{
    Accuracy,
    MoveCategory,
    MoveData,
    MoveFlag,
    MoveTarget,
    Type,
};

use crate::common::Id;

/// A single use of a move.
///
/// Holds its own copy of the move's data, which effects are free to modify for the duration of
/// the use.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveMove {
    pub id: Id,
    pub data: MoveData,
    /// Multiplier for same-type attacks.
    pub stab_multiplier: f64,
    /// Skip type immunity checks.
    pub ignore_immunity: bool,
    /// Current hit, starting at 1.
    pub hit: u8,
    /// Damage dealt across all hits.
    pub total_damage: u32,
    /// Whether the last hit was a critical hit.
    pub crit: bool,
    /// Secondary effects were removed, which also skips hooks that run after them.
    pub secondaries_suppressed: bool,
}

impl ActiveMove {
    pub fn new(id: Id, data: MoveData) -> Self {
        let ignore_immunity = data.category == MoveCategory::Status;
        Self {
            id,
            data,
            stab_multiplier: 1.5,
            ignore_immunity,
            hit: 0,
            total_damage: 0,
            crit: false,
            secondaries_suppressed: false,
        }
    }

    /// The typeless move a confused Mon hits itself with.
    pub fn confusion_self_hit() -> Self {
        Self::new(
            Id::from_known("confused"),
            MoveData {
                name: "Confused".to_owned(),
                category: MoveCategory::Physical,
                primary_type: Type::None,
                base_power: 40,
                accuracy: Accuracy::Exempt,
                target: MoveTarget::User,
                ..Default::default()
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn move_type(&self) -> Type {
        self.data.primary_type
    }

    pub fn category(&self) -> MoveCategory {
        self.data.category
    }

    pub fn is_status(&self) -> bool {
        self.data.category == MoveCategory::Status
    }

    pub fn has_flag(&self, flag: MoveFlag) -> bool {
        self.data.has_flag(flag)
    }

    pub fn is_contact(&self) -> bool {
        self.has_flag(MoveFlag::Contact)
    }

    /// Whether the move targets the opposing Mon.
    pub fn targets_foe(&self) -> bool {
        self.data.target == MoveTarget::Normal
    }

    pub fn has_secondary_effects(&self) -> bool {
        !self.data.secondary_effects.is_empty()
    }
}
