use serde::{
    Deserialize,
    Serialize,
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::effect::EffectCategory;

/// How exact speed ties are resolved.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum SpeedTieResolution {
    /// Uniformly shuffled with the battle's random stream.
    #[string = "Random"]
    #[default]
    Random,
    /// Kept in their original order.
    #[string = "Keep"]
    Keep,
    /// Reversed.
    #[string = "Reverse"]
    Reverse,
}

/// Options for a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleOptions {
    /// Seed for the battle's random stream.
    pub seed: Option<u64>,
    /// Panic on invariant violations instead of correcting them.
    pub strict_invariants: bool,
    /// Categories whose durations are decremented by the engine at the end of each turn.
    ///
    /// Weather always runs its own duration.
    pub auto_expire: Vec<EffectCategory>,
    pub speed_tie_resolution: SpeedTieResolution,
    /// At most one Mon per side may be put to sleep by the opponent.
    pub sleep_clause: bool,
    /// Turn after which the battle ends in a tie.
    pub turn_limit: Option<u64>,
}

impl Default for BattleOptions {
    fn default() -> Self {
        Self {
            seed: None,
            strict_invariants: cfg!(debug_assertions),
            auto_expire: Vec::from([
                EffectCategory::Status,
                EffectCategory::Volatile,
                EffectCategory::Hazard,
                EffectCategory::SideCondition,
                EffectCategory::PseudoWeather,
                EffectCategory::Ability,
                EffectCategory::Item,
            ]),
            speed_tie_resolution: SpeedTieResolution::Random,
            sleep_clause: true,
            turn_limit: None,
        }
    }
}
