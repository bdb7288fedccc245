use std::sync::Arc;

use anyhow::{
    Context,
    Result,
};
use duel_data::StatTable;
use duel_prng::{
    PseudoRandomNumberGenerator,
    RealPseudoRandomNumberGenerator,
};

use crate::{
    battle::{
        Battle,
        BattleOptions,
        Field,
        Mon,
        MoveSlot,
        Side,
        calculations::calculate_stats,
    },
    common::Id,
    conditions,
    decision::{
        DecisionMaker,
        FirstChoiceDecisionMaker,
    },
    dex::Dex,
    effect::EffectMap,
    error::general_error,
    teams::{
        MonData,
        TeamData,
    },
};

const DEFAULT_EV: u16 = 85;
const DEFAULT_IV: u16 = 31;
const NO_ABILITY: Id = Id::from_known("noability");

/// Builds a [`Battle`] from two teams.
pub struct BattleBuilder {
    options: BattleOptions,
    teams: [Option<(String, TeamData)>; 2],
    decision_makers: [Option<Box<dyn DecisionMaker>>; 2],
    prng: Option<Box<dyn PseudoRandomNumberGenerator>>,
    invalid_side: Option<usize>,
}

impl BattleBuilder {
    pub fn new(options: BattleOptions) -> Self {
        Self {
            options,
            teams: [None, None],
            decision_makers: [None, None],
            prng: None,
            invalid_side: None,
        }
    }

    /// Sets the team for a side.
    pub fn with_team(mut self, side: usize, name: &str, team: TeamData) -> Self {
        match self.teams.get_mut(side) {
            Some(slot) => *slot = Some((name.to_owned(), team)),
            None => self.invalid_side = Some(side),
        }
        self
    }

    /// Sets the decision maker for a side.
    ///
    /// Sides without one always pick their first legal choice.
    pub fn with_decision_maker(mut self, side: usize, decision_maker: Box<dyn DecisionMaker>) -> Self {
        match self.decision_makers.get_mut(side) {
            Some(slot) => *slot = Some(decision_maker),
            None => self.invalid_side = Some(side),
        }
        self
    }

    /// Overrides the random number generator, which otherwise comes from the seed in the
    /// options.
    pub fn with_prng(mut self, prng: Box<dyn PseudoRandomNumberGenerator>) -> Self {
        self.prng = Some(prng);
        self
    }

    pub fn build(self, dex: Arc<Dex>) -> Result<Battle> {
        if let Some(side) = self.invalid_side {
            return Err(general_error(format!("side {side} does not exist")));
        }
        let [team_0, team_1] = self.teams;
        let side_0 = build_side(&dex, 0, team_0)?;
        let side_1 = build_side(&dex, 1, team_1)?;
        let prng = self
            .prng
            .unwrap_or_else(|| Box::new(RealPseudoRandomNumberGenerator::new(self.options.seed)));
        let decision_makers = self.decision_makers.map(|decision_maker| {
            decision_maker
                .unwrap_or_else(|| Box::new(FirstChoiceDecisionMaker) as Box<dyn DecisionMaker>)
        });
        Ok(Battle::new(
            Field::new([side_0, side_1]),
            dex,
            self.options,
            prng,
            decision_makers,
        ))
    }
}

fn build_side(dex: &Dex, side: usize, team: Option<(String, TeamData)>) -> Result<Side> {
    let (name, team) = team.ok_or_else(|| general_error(format!("side {side} has no team")))?;
    if team.members.is_empty() {
        return Err(general_error(format!("team for side {side} is empty")));
    }
    let mons = team
        .members
        .iter()
        .enumerate()
        .map(|(position, data)| {
            build_mon(dex, side, position, data)
                .with_context(|| format!("invalid mon at position {position} of side {side}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Side::new(side, name, mons))
}

pub(crate) fn build_mon(dex: &Dex, side: usize, position: usize, data: &MonData) -> Result<Mon> {
    let species = dex.species(&Id::from(data.species.as_str()))?;
    let ivs = data
        .ivs
        .clone()
        .unwrap_or_else(|| StatTable::uniform(DEFAULT_IV));
    let evs = data
        .evs
        .clone()
        .unwrap_or_else(|| StatTable::uniform(DEFAULT_EV));
    let stats = calculate_stats(&species.base_stats, &ivs, &evs, data.level);
    let max_hp = species.max_hp.unwrap_or(stats.hp);
    let hp = data.hp.map_or(max_hp, |hp| hp.min(max_hp));

    let moves = data
        .moves
        .iter()
        .map(|name| {
            let id = Id::from(name.as_str());
            let move_data = dex.move_data(&id)?;
            Ok(MoveSlot {
                id,
                name: move_data.name,
                pp: move_data.pp,
                max_pp: move_data.pp,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    if moves.is_empty() {
        return Err(general_error(format!("{} has no moves", species.name)));
    }

    let ability = data
        .ability
        .as_deref()
        .or(species.abilities.first().map(|ability| ability.as_str()))
        .map_or(NO_ABILITY, Id::from);
    let name = if data.name.is_empty() {
        species.name.clone()
    } else {
        data.name.clone()
    };
    // A pre-set status waits on the Mon until it switches in, like a status picked up earlier.
    let stashed_status = data
        .status
        .filter(|_| hp > 0)
        .map(conditions::status_effect);

    Ok(Mon {
        name,
        species: Id::from(species.name.as_str()),
        side,
        position,
        level: data.level,
        types: species.types(),
        stats,
        max_hp,
        hp,
        boosts: data.boosts.clone(),
        status: data.status.filter(|_| hp > 0),
        active: false,
        moves,
        ability,
        item: data.item.as_deref().map(Id::from),
        effects: EffectMap::new(),
        stashed_status,
        must_switch: false,
        last_move: None,
        active_turns: 0,
    })
}

#[cfg(test)]
mod battle_builder_test {
    use std::sync::Arc;

    use duel_data::{
        StatTable,
        Status,
    };
    use pretty_assertions::assert_eq;

    use crate::{
        battle::{
            BattleBuilder,
            BattleOptions,
            MonHandle,
        },
        dex::Dex,
        teams::{
            MonData,
            TeamData,
        },
    };

    fn team(members: Vec<MonData>) -> TeamData {
        TeamData { members }
    }

    #[test]
    fn builds_mons_with_default_spread() {
        let dex = Arc::new(Dex::embedded().unwrap());
        let battle = BattleBuilder::new(BattleOptions::default())
            .with_team(0, "Player 1", team(vec![MonData::new("Vaporeon", &["Scald"])]))
            .with_team(1, "Player 2", team(vec![MonData::new("Flareon", &["Flamethrower"])]))
            .build(dex)
            .unwrap();
        let mon = battle.mon(MonHandle::new(0, 0)).unwrap();
        assert_eq!(mon.name, "Vaporeon");
        assert_eq!(mon.level, 100);
        assert_eq!(mon.ability.as_str(), "waterabsorb");
        // 31 IVs and 85 EVs.
        assert_eq!(mon.max_hp, 422);
        assert_eq!(mon.hp, 422);
        assert_eq!(mon.moves[0].name, "Scald");
    }

    #[test]
    fn keeps_supplied_state() {
        let dex = Arc::new(Dex::embedded().unwrap());
        let mut vaporeon = MonData::new("Vaporeon", &["Scald"]);
        vaporeon.evs = Some(StatTable::default());
        vaporeon.hp = Some(1000);
        vaporeon.status = Some(Status::Burn);
        let battle = BattleBuilder::new(BattleOptions::default())
            .with_team(0, "Player 1", team(vec![vaporeon]))
            .with_team(1, "Player 2", team(vec![MonData::new("Flareon", &["Flamethrower"])]))
            .build(dex)
            .unwrap();
        let mon = battle.mon(MonHandle::new(0, 0)).unwrap();
        assert_eq!(mon.max_hp, 401);
        assert_eq!(mon.hp, 401);
        assert_eq!(mon.status, Some(Status::Burn));
    }

    #[test]
    fn fails_for_unknown_species_or_missing_team() {
        let dex = Arc::new(Dex::embedded().unwrap());
        let unknown_species = BattleBuilder::new(BattleOptions::default())
            .with_team(0, "Player 1", team(vec![MonData::new("Missingno", &["Scald"])]))
            .with_team(1, "Player 2", team(vec![MonData::new("Flareon", &["Flamethrower"])]))
            .build(dex.clone());
        assert_eq!(
            unknown_species.err().map(|error| format!("{error:#}")),
            Some("invalid mon at position 0 of side 0: species missingno not found".to_owned())
        );

        let missing_team = BattleBuilder::new(BattleOptions::default())
            .with_team(0, "Player 1", team(vec![MonData::new("Vaporeon", &["Scald"])]))
            .build(dex);
        assert_eq!(
            missing_team.err().map(|error| error.to_string()),
            Some("side 1 has no team".to_owned())
        );
    }
}
