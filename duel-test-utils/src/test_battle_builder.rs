use std::sync::Arc;

use anyhow::Result;
use duel::{
    battle::{
        Battle,
        BattleBuilder,
        BattleOptions,
        SpeedTieResolution,
    },
    decision::DecisionMaker,
    dex::Dex,
    teams::{
        MonData,
        TeamData,
    },
};
use duel_data::StatTable;

use crate::ControlledRandomNumberGenerator;

/// A level 100 Mon with no effort values and no ability.
pub fn test_mon(species: &str, moves: &[&str]) -> MonData {
    let mut mon = MonData::new(species, moves);
    mon.ability = Some("No Ability".to_owned());
    mon.evs = Some(StatTable::default());
    mon
}

/// Parses a team from JSON.
pub fn test_team(json: &str) -> Result<TeamData> {
    Ok(serde_json::from_str(json)?)
}

/// Battle builder object for integration tests.
///
/// Speed ties keep their order and invariants are strict unless configured otherwise.
pub struct TestBattleBuilder {
    options: BattleOptions,
    teams: [TeamData; 2],
    decision_makers: [Option<Box<dyn DecisionMaker>>; 2],
    controlled_rng: bool,
}

impl TestBattleBuilder {
    /// Creates a new [`TestBattleBuilder`].
    pub fn new() -> Self {
        Self {
            options: BattleOptions {
                seed: Some(0),
                strict_invariants: true,
                speed_tie_resolution: SpeedTieResolution::Keep,
                ..Default::default()
            },
            teams: [TeamData::default(), TeamData::default()],
            decision_makers: [None, None],
            controlled_rng: false,
        }
    }

    /// Builds a new [`Battle`] from the battle builder.
    pub fn build(self) -> Result<Battle> {
        let seed = self.options.seed;
        let [team_0, team_1] = self.teams;
        let [decision_maker_0, decision_maker_1] = self.decision_makers;
        let mut builder = BattleBuilder::new(self.options)
            .with_team(0, "Player 1", team_0)
            .with_team(1, "Player 2", team_1);
        if self.controlled_rng {
            builder = builder.with_prng(Box::new(ControlledRandomNumberGenerator::new(seed)));
        }
        if let Some(decision_maker) = decision_maker_0 {
            builder = builder.with_decision_maker(0, decision_maker);
        }
        if let Some(decision_maker) = decision_maker_1 {
            builder = builder.with_decision_maker(1, decision_maker);
        }
        builder.build(Arc::new(Dex::embedded()?))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    pub fn with_controlled_rng(mut self, controlled_rng: bool) -> Self {
        self.controlled_rng = controlled_rng;
        self
    }

    pub fn with_speed_tie_resolution(mut self, speed_tie_resolution: SpeedTieResolution) -> Self {
        self.options.speed_tie_resolution = speed_tie_resolution;
        self
    }

    pub fn with_strict_invariants(mut self, strict_invariants: bool) -> Self {
        self.options.strict_invariants = strict_invariants;
        self
    }

    pub fn with_sleep_clause(mut self, sleep_clause: bool) -> Self {
        self.options.sleep_clause = sleep_clause;
        self
    }

    pub fn with_turn_limit(mut self, turn_limit: u64) -> Self {
        self.options.turn_limit = Some(turn_limit);
        self
    }

    pub fn with_options(mut self, options: BattleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_team(mut self, side: usize, team: TeamData) -> Self {
        self.teams[side] = team;
        self
    }

    pub fn with_mons(self, side: usize, members: Vec<MonData>) -> Self {
        self.with_team(side, TeamData { members })
    }

    pub fn with_decision_maker(mut self, side: usize, decision_maker: Box<dyn DecisionMaker>) -> Self {
        self.decision_makers[side] = Some(decision_maker);
        self
    }
}
