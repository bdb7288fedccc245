use std::sync::{
    Arc,
    RwLock,
};

use anyhow::Result;
use log::{
    debug,
    info,
};
use rayon::prelude::*;

use crate::{
    battle::{
        Battle,
        BattleOutcome,
        TurnState,
    },
    common::FastHashMap,
    error::general_error,
    rollout::{
        RolloutOptions,
        RosterKey,
        UnrevealedFiller,
    },
    teams::MonData,
};

/// How a single simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloutResult {
    Finished(BattleOutcome),
    /// Hit the turn limit before the battle ended.
    Abandoned,
}

/// Tally of a batch of simulations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RolloutSummary {
    pub wins: [u32; 2],
    pub ties: u32,
    pub abandoned: u32,
}

impl RolloutSummary {
    pub fn record(&mut self, result: RolloutResult) {
        match result {
            RolloutResult::Finished(BattleOutcome::Win(side)) => {
                if let Some(wins) = self.wins.get_mut(side) {
                    *wins += 1;
                }
            }
            RolloutResult::Finished(BattleOutcome::Tie) => self.ties += 1,
            RolloutResult::Abandoned => self.abandoned += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.wins[0] + self.wins[1] + self.ties + self.abandoned
    }

    /// Share of finished simulations won by the side.
    pub fn win_rate(&self, side: usize) -> f64 {
        let finished = self.total() - self.abandoned;
        if finished == 0 {
            return 0.0;
        }
        self.wins.get(side).copied().unwrap_or_default() as f64 / finished as f64
    }
}

/// Samples outcomes of a battle by simulating independent copies of it to the end.
///
/// The opponent's roster is completed by an [`UnrevealedFiller`] before simulating. Fills are
/// cached per revealed roster, and the cache is dropped as soon as the roster changes.
pub struct BattleRoller {
    battle: Battle,
    filler: Box<dyn UnrevealedFiller>,
    options: RolloutOptions,
    cache: RwLock<FastHashMap<RosterKey, Arc<Vec<MonData>>>>,
}

impl BattleRoller {
    pub fn new(battle: Battle, filler: Box<dyn UnrevealedFiller>, options: RolloutOptions) -> Self {
        Self {
            battle,
            filler,
            options,
            cache: RwLock::new(FastHashMap::default()),
        }
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    /// Replaces the battle that rollouts start from, such as after a turn of the real game.
    pub fn set_battle(&mut self, battle: Battle) {
        self.battle = battle;
    }

    pub fn options(&self) -> &RolloutOptions {
        &self.options
    }

    fn opponent(&self) -> usize {
        1 - self.options.side
    }

    /// Mons filling the opponent's unrevealed slots.
    pub fn fill_unrevealed(&self) -> Result<Arc<Vec<MonData>>> {
        let opponent = self.opponent();
        let key = RosterKey::of(&self.battle, opponent)?;
        if let Some(fill) = self
            .cache
            .read()
            .map_err(|_| general_error("rollout cache is poisoned"))?
            .get(&key)
        {
            return Ok(fill.clone());
        }

        let side = self.battle.side(opponent)?;
        let missing = self.options.team_size.saturating_sub(side.mons.len());
        let fill = if missing == 0 {
            Vec::new()
        } else {
            let revealed = side.mons.iter().collect::<Vec<_>>();
            let mut fill = self.filler.fill(&revealed, missing)?;
            fill.truncate(missing);
            fill
        };
        let fill = Arc::new(fill);

        let mut cache = self
            .cache
            .write()
            .map_err(|_| general_error("rollout cache is poisoned"))?;
        if cache.keys().any(|cached| *cached != key) {
            debug!("opponent roster changed to {key}, clearing rollout cache");
            cache.clear();
        }
        cache.insert(key, fill.clone());
        Ok(fill)
    }

    /// The battle with the opponent's roster filled in.
    fn root(&self) -> Result<Battle> {
        let fill = self.fill_unrevealed()?;
        let mut root = self.battle.snapshot();
        for data in fill.iter() {
            root.add_mon(self.opponent(), data)?;
        }
        Ok(root)
    }

    /// Runs [`RolloutOptions::rollouts`] simulations.
    pub fn rollout(&self) -> Result<RolloutSummary> {
        self.rollout_battles(self.options.rollouts)
    }

    /// Runs `n` simulations in parallel.
    ///
    /// Simulation `i` runs with seed `base_seed + i`, so the summary does not depend on
    /// scheduling.
    pub fn rollout_battles(&self, n: usize) -> Result<RolloutSummary> {
        let root = self.root()?;
        let base_seed = self.options.base_seed;
        let turn_limit = self.options.turn_limit;
        let results = (0..n)
            .into_par_iter()
            .map(|i| {
                let mut battle = root.snapshot();
                battle.reseed(base_seed.wrapping_add(i as u64));
                run_rollout(battle, turn_limit)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut summary = RolloutSummary::default();
        for result in results {
            summary.record(result);
        }
        info!("rolled out {n} battles: {summary:?}");
        Ok(summary)
    }
}

/// Drives a battle to the end, or abandons it once it passes the turn limit.
pub fn run_rollout(mut battle: Battle, turn_limit: Option<u64>) -> Result<RolloutResult> {
    if battle.state() == TurnState::Init {
        battle.init_battle()?;
    }
    loop {
        if let Some(outcome) = battle.outcome() {
            return Ok(RolloutResult::Finished(outcome));
        }
        if turn_limit.is_some_and(|limit| battle.turn() > limit) {
            return Ok(RolloutResult::Abandoned);
        }
        battle.run_turn()?;
    }
}

#[cfg(test)]
mod roller_test {
    use std::sync::{
        Arc,
        atomic::{
            AtomicUsize,
            Ordering,
        },
    };

    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use crate::{
        battle::{
            BattleOutcome,
            Mon,
        },
        rollout::{
            BattleRoller,
            PoolFiller,
            RolloutOptions,
            RolloutResult,
            RolloutSummary,
            UnrevealedFiller,
        },
        teams::MonData,
        test_util::{
            test_battle,
            test_mon,
        },
    };

    struct CountingFiller {
        calls: Arc<AtomicUsize>,
    }

    impl UnrevealedFiller for CountingFiller {
        fn fill(&self, _: &[&Mon], missing: usize) -> Result<Vec<MonData>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..missing).map(|_| test_mon("Jolteon")).collect())
        }
    }

    fn options() -> RolloutOptions {
        RolloutOptions {
            rollouts: 8,
            turn_limit: Some(200),
            base_seed: 1000,
            side: 0,
            team_size: 2,
        }
    }

    #[test]
    fn caches_fill_until_roster_changes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut roller = BattleRoller::new(
            test_battle(),
            Box::new(CountingFiller {
                calls: calls.clone(),
            }),
            options(),
        );
        assert_eq!(roller.fill_unrevealed().unwrap().len(), 1);
        assert_eq!(roller.fill_unrevealed().unwrap().len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let mut battle = test_battle();
        battle.add_mon(1, &test_mon("Umbreon")).unwrap();
        roller.set_battle(battle);
        assert_eq!(roller.fill_unrevealed().unwrap().len(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let mut battle = test_battle();
        battle.add_mon(1, &test_mon("Espeon")).unwrap();
        battle.add_mon(1, &test_mon("Leafeon")).unwrap();
        roller.set_battle(battle);
        assert_eq!(roller.fill_unrevealed().unwrap().len(), 0);

        roller.set_battle(test_battle());
        assert_eq!(roller.fill_unrevealed().unwrap().len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn rollouts_are_reproducible() {
        let roller = BattleRoller::new(
            test_battle(),
            Box::new(PoolFiller::new(vec![test_mon("Jolteon")])),
            options(),
        );
        let first = roller.rollout().unwrap();
        let second = roller.rollout().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total(), 8);
        assert_eq!(first.abandoned, 0);
    }

    #[test]
    fn abandons_battles_past_turn_limit() {
        let roller = BattleRoller::new(
            test_battle(),
            Box::new(PoolFiller::default()),
            RolloutOptions {
                turn_limit: Some(1),
                ..options()
            },
        );
        assert_eq!(
            roller.rollout_battles(4).unwrap(),
            RolloutSummary {
                abandoned: 4,
                ..Default::default()
            }
        );
    }

    #[test]
    fn win_rate_ignores_abandoned_rollouts() {
        let mut summary = RolloutSummary::default();
        summary.record(RolloutResult::Finished(BattleOutcome::Win(0)));
        summary.record(RolloutResult::Finished(BattleOutcome::Win(1)));
        summary.record(RolloutResult::Finished(BattleOutcome::Win(0)));
        summary.record(RolloutResult::Finished(BattleOutcome::Tie));
        summary.record(RolloutResult::Abandoned);
        assert_eq!(summary.total(), 5);
        assert_eq!(summary.win_rate(0), 0.5);
        assert_eq!(summary.win_rate(1), 0.25);
    }
}
