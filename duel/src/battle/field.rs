use crate::{
    battle::{
        BattleOutcome,
        Side,
    },
    common::Id,
    effect::EffectMap,
};

/// The battlefield, which owns both sides.
#[derive(Debug, Clone)]
pub struct Field {
    pub sides: [Side; 2],
    /// Field-wide effects, including pseudo-weather and weather.
    pub effects: EffectMap,
    pub weather: Option<Id>,
    pub turn: u64,
    pub outcome: Option<BattleOutcome>,
}

impl Field {
    pub fn new(sides: [Side; 2]) -> Self {
        Self {
            sides,
            effects: EffectMap::new(),
            weather: None,
            turn: 0,
            outcome: None,
        }
    }

    pub fn ended(&self) -> bool {
        self.outcome.is_some()
    }
}
