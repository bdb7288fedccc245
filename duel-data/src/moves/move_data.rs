use ahash::HashSet;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    Accuracy,
    BoostTable,
    MoveCategory,
    MoveFlag,
    MoveTarget,
    Status,
    Type,
};

/// An effect applied to a single Mon when a move hits.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitEffect {
    /// Status applied.
    pub status: Option<Status>,
    /// Volatile condition applied.
    pub volatile: Option<String>,
    /// Stat boosts applied.
    pub boosts: Option<BoostTable>,
}

/// An effect that occurs after a damaging move hits, with its own probability roll.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryEffectData {
    /// Percentage chance of the effect occurring.
    pub chance: u8,
    /// Effect on the target.
    pub target: Option<HitEffect>,
    /// Effect on the user.
    pub user: Option<HitEffect>,
}

/// Data about a particular move.
///
/// Move data is immutable. Each use of a move works on its own copy, so that effects can modify
/// the move for a single use.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    /// Name of the move.
    pub name: String,
    /// Move category.
    pub category: MoveCategory,
    /// Move type.
    pub primary_type: Type,
    /// Base power.
    #[serde(default)]
    pub base_power: u32,
    /// Base accuracy.
    #[serde(default)]
    pub accuracy: Accuracy,
    /// Total power points.
    #[serde(default)]
    pub pp: u8,
    /// Move priority.
    #[serde(default)]
    pub priority: i8,
    /// Move target.
    #[serde(default)]
    pub target: MoveTarget,
    /// Move flags.
    #[serde(default)]
    pub flags: HashSet<MoveFlag>,

    /// Critical hit stage, indexing into the critical hit chance table.
    #[serde(default)]
    pub crit_ratio: u8,
    /// Always lands a critical hit.
    #[serde(default)]
    pub always_crit: bool,
    /// Possible hit counts, picked uniformly.
    #[serde(default)]
    pub multihit: Vec<u8>,
    /// Percentage of damage dealt that heals the user.
    pub drain_percent: Option<u8>,
    /// Percentage of damage dealt that the user takes as recoil.
    pub recoil_percent: Option<u8>,
    /// The user faints after using the move.
    #[serde(default)]
    pub self_destruct: bool,
    /// The user switches out after using the move.
    #[serde(default)]
    pub user_switch: bool,
    /// Ignores the user's offensive boosts.
    #[serde(default)]
    pub ignore_offensive_boosts: bool,
    /// Ignores the target's defensive boosts.
    #[serde(default)]
    pub ignore_defensive_boosts: bool,
    /// Category used for the target's defensive stat, if different.
    pub defensive_category: Option<MoveCategory>,

    /// Primary effect on the target.
    pub hit_effect: Option<HitEffect>,
    /// Primary effect on the user.
    pub user_effect: Option<HitEffect>,
    /// Side condition started on the user's side.
    pub side_condition: Option<String>,
    /// Hazard laid on the opposing side.
    pub hazard: Option<String>,
    /// Weather started.
    pub weather: Option<String>,
    /// Pseudo-weather started.
    pub pseudo_weather: Option<String>,
    /// Secondary effects.
    #[serde(default)]
    pub secondary_effects: Vec<SecondaryEffectData>,
}

impl MoveData {
    pub fn has_flag(&self, flag: MoveFlag) -> bool {
        self.flags.contains(&flag)
    }
}

#[cfg(test)]
mod move_data_test {
    use assert_matches::assert_matches;

    use crate::{
        Accuracy,
        MoveCategory,
        MoveData,
        MoveFlag,
        Status,
        Type,
    };

    #[test]
    fn deserializes_sparse_move() {
        let data: MoveData = serde_json::from_str(
            r#"{
                "name": "Scald",
                "category": "Special",
                "primary_type": "Water",
                "base_power": 80,
                "accuracy": 100,
                "pp": 15,
                "flags": ["Protect"],
                "secondary_effects": [
                    { "chance": 30, "target": { "status": "brn" } }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(data.category, MoveCategory::Special);
        assert_eq!(data.primary_type, Type::Water);
        assert_eq!(data.accuracy, Accuracy::Chance(100));
        assert!(data.has_flag(MoveFlag::Protect));
        assert!(!data.has_flag(MoveFlag::Contact));
        assert_eq!(data.crit_ratio, 0);
        assert_matches!(
            data.secondary_effects.as_slice(),
            [secondary] => {
                assert_eq!(secondary.chance, 30);
                assert_eq!(secondary.target.as_ref().and_then(|t| t.status), Some(Status::Burn));
            }
        );
    }
}
