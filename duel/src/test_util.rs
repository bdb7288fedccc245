use std::{
    any::Any,
    collections::VecDeque,
    sync::Arc,
};

use duel_data::StatTable;
use duel_prng::{
    PseudoRandomNumberGenerator,
    RealPseudoRandomNumberGenerator,
};

use crate::{
    battle::{
        Battle,
        BattleBuilder,
        BattleOptions,
        SpeedTieResolution,
    },
    dex::Dex,
    teams::{
        MonData,
        TeamData,
    },
};

/// Replays a fixed sequence of values, then continues with a seeded generator.
#[derive(Debug, Clone)]
pub struct SequencePseudoRandomNumberGenerator {
    values: VecDeque<u64>,
    real: RealPseudoRandomNumberGenerator,
}

impl SequencePseudoRandomNumberGenerator {
    pub fn new(values: Vec<u64>) -> Self {
        Self {
            values: values.into(),
            real: RealPseudoRandomNumberGenerator::new(Some(0)),
        }
    }
}

impl PseudoRandomNumberGenerator for SequencePseudoRandomNumberGenerator {
    fn initial_seed(&self) -> u64 {
        self.real.initial_seed()
    }

    fn next(&mut self) -> u64 {
        let next = self.real.next();
        self.values.pop_front().unwrap_or(next)
    }

    fn clone_box(&self) -> Box<dyn PseudoRandomNumberGenerator> {
        Box::new(self.clone())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub fn test_options() -> BattleOptions {
    BattleOptions {
        seed: Some(0),
        strict_invariants: true,
        speed_tie_resolution: SpeedTieResolution::Keep,
        ..Default::default()
    }
}

/// A level 100 Mon with no effort values, no ability, and a single Tackle.
pub fn test_mon(species: &str) -> MonData {
    let mut mon = MonData::new(species, &["Tackle"]);
    mon.ability = Some("No Ability".to_owned());
    mon.evs = Some(StatTable::default());
    mon
}

/// A battle whose random stream starts with `values`.
pub fn test_battle_with_prng(side_0: Vec<MonData>, side_1: Vec<MonData>, values: Vec<u64>) -> Battle {
    BattleBuilder::new(test_options())
        .with_team(0, "Player 1", TeamData { members: side_0 })
        .with_team(1, "Player 2", TeamData { members: side_1 })
        .with_prng(Box::new(SequencePseudoRandomNumberGenerator::new(values)))
        .build(Arc::new(Dex::embedded().unwrap()))
        .unwrap()
}

pub fn test_battle() -> Battle {
    test_battle_with_prng(
        vec![test_mon("Vaporeon")],
        vec![test_mon("Flareon")],
        Vec::new(),
    )
}
