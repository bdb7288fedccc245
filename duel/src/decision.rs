//! Policies that choose actions for a side.

use std::collections::VecDeque;

use duel_prng::{
    RealPseudoRandomNumberGenerator,
    rand_util,
};

use crate::{
    battle::Battle,
    common::Id,
};

/// A side's choice for a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Use the move with the given ID.
    Move(Id),
    /// Switch to the Mon at the given team position.
    Switch(usize),
}

/// The legal choices for a side at the start of a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    pub side: usize,
    pub turn: u64,
    /// Never empty.
    pub moves: Vec<Id>,
    /// Empty when the active Mon is trapped.
    pub switches: Vec<usize>,
}

/// Chooses actions for one side of a battle.
///
/// Decision makers are cloned along with the battle, so any random state they carry must be owned.
pub trait DecisionMaker: Send + Sync {
    /// Chooses an action for the turn.
    fn choose_action(&mut self, battle: &Battle, request: &DecisionRequest) -> Choice;

    /// Chooses a Mon to fill an empty or vacated active slot. `options` is never empty.
    fn choose_switch(&mut self, battle: &Battle, side: usize, options: &[usize]) -> usize;

    fn clone_box(&self) -> Box<dyn DecisionMaker>;

    /// Resets any random state.
    fn reseed(&mut self, seed: u64) {
        let _ = seed;
    }
}

impl Clone for Box<dyn DecisionMaker> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Always picks the first legal move and the first switch option.
#[derive(Debug, Clone, Default)]
pub struct FirstChoiceDecisionMaker;

impl FirstChoiceDecisionMaker {
    fn choose_first(&self, request: &DecisionRequest) -> Choice {
        match request.moves.first() {
            Some(id) => Choice::Move(id.clone()),
            None => Choice::Switch(request.switches.first().copied().unwrap_or_default()),
        }
    }
}

impl DecisionMaker for FirstChoiceDecisionMaker {
    fn choose_action(&mut self, _: &Battle, request: &DecisionRequest) -> Choice {
        self.choose_first(request)
    }

    fn choose_switch(&mut self, _: &Battle, _: usize, options: &[usize]) -> usize {
        options.first().copied().unwrap_or_default()
    }

    fn clone_box(&self) -> Box<dyn DecisionMaker> {
        Box::new(self.clone())
    }
}

/// Picks uniformly among legal moves, never switching voluntarily.
#[derive(Debug, Clone)]
pub struct RandomDecisionMaker {
    prng: RealPseudoRandomNumberGenerator,
}

impl RandomDecisionMaker {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            prng: RealPseudoRandomNumberGenerator::new(seed),
        }
    }

    fn random_move(&mut self, request: &DecisionRequest) -> Choice {
        match rand_util::sample_slice(&mut self.prng, &request.moves) {
            Some(id) => Choice::Move(id.clone()),
            None => FirstChoiceDecisionMaker.choose_first(request),
        }
    }

    fn random_switch(&mut self, options: &[usize]) -> usize {
        rand_util::sample_slice(&mut self.prng, options)
            .copied()
            .unwrap_or_default()
    }
}

impl DecisionMaker for RandomDecisionMaker {
    fn choose_action(&mut self, _: &Battle, request: &DecisionRequest) -> Choice {
        self.random_move(request)
    }

    fn choose_switch(&mut self, _: &Battle, _: usize, options: &[usize]) -> usize {
        self.random_switch(options)
    }

    fn clone_box(&self) -> Box<dyn DecisionMaker> {
        Box::new(self.clone())
    }

    fn reseed(&mut self, seed: u64) {
        self.prng = RealPseudoRandomNumberGenerator::new(Some(seed));
    }
}

/// Like [`RandomDecisionMaker`], but switches out one time in ten when it can.
#[derive(Debug, Clone)]
pub struct RandomWithSwitchesDecisionMaker {
    random: RandomDecisionMaker,
}

impl RandomWithSwitchesDecisionMaker {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: RandomDecisionMaker::new(seed),
        }
    }
}

impl DecisionMaker for RandomWithSwitchesDecisionMaker {
    fn choose_action(&mut self, _: &Battle, request: &DecisionRequest) -> Choice {
        if !request.switches.is_empty() && rand_util::chance(&mut self.random.prng, 1, 10) {
            return Choice::Switch(self.random.random_switch(&request.switches));
        }
        self.random.random_move(request)
    }

    fn choose_switch(&mut self, _: &Battle, _: usize, options: &[usize]) -> usize {
        self.random.random_switch(options)
    }

    fn clone_box(&self) -> Box<dyn DecisionMaker> {
        Box::new(self.clone())
    }

    fn reseed(&mut self, seed: u64) {
        self.random.reseed(seed);
    }
}

/// Replays a fixed queue of choices.
///
/// Switch prompts consume a queued switch if one is next. Once the queue runs dry, the first
/// legal choice is used.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisionMaker {
    choices: VecDeque<Choice>,
}

impl ScriptedDecisionMaker {
    pub fn new<I>(choices: I) -> Self
    where
        I: IntoIterator<Item = Choice>,
    {
        Self {
            choices: choices.into_iter().collect(),
        }
    }

    /// Queues more choices.
    pub fn push(&mut self, choice: Choice) {
        self.choices.push_back(choice);
    }

    pub fn remaining(&self) -> usize {
        self.choices.len()
    }
}

impl DecisionMaker for ScriptedDecisionMaker {
    fn choose_action(&mut self, _: &Battle, request: &DecisionRequest) -> Choice {
        self.choices
            .pop_front()
            .unwrap_or_else(|| FirstChoiceDecisionMaker.choose_first(request))
    }

    fn choose_switch(&mut self, _: &Battle, _: usize, options: &[usize]) -> usize {
        if let Some(Choice::Switch(position)) = self.choices.front() {
            let position = *position;
            self.choices.pop_front();
            return position;
        }
        options.first().copied().unwrap_or_default()
    }

    fn clone_box(&self) -> Box<dyn DecisionMaker> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod decision_test {
    use pretty_assertions::assert_eq;

    use crate::{
        decision::{
            Choice,
            DecisionMaker,
            DecisionRequest,
            RandomDecisionMaker,
            ScriptedDecisionMaker,
        },
        test_util::test_battle,
    };

    fn request() -> DecisionRequest {
        DecisionRequest {
            side: 0,
            turn: 1,
            moves: vec!["tackle".into(), "scald".into(), "protect".into()],
            switches: vec![1, 2],
        }
    }

    #[test]
    fn random_choices_follow_seed() {
        let battle = test_battle();
        let mut a = RandomDecisionMaker::new(Some(7));
        let mut b = a.clone_box();
        let choices_a = (0..10)
            .map(|_| a.choose_action(&battle, &request()))
            .collect::<Vec<_>>();
        let choices_b = (0..10)
            .map(|_| b.choose_action(&battle, &request()))
            .collect::<Vec<_>>();
        assert_eq!(choices_a, choices_b);
        assert!(choices_a.iter().all(|choice| matches!(choice, Choice::Move(_))));
    }

    #[test]
    fn scripted_choices_fall_back_to_first_move() {
        let battle = test_battle();
        let mut scripted = ScriptedDecisionMaker::new([Choice::Switch(2), Choice::Move("scald".into())]);
        assert_eq!(scripted.choose_switch(&battle, 0, &[1, 2]), 2);
        assert_eq!(scripted.choose_switch(&battle, 0, &[1, 2]), 1);
        assert_eq!(
            scripted.choose_action(&battle, &request()),
            Choice::Move("scald".into())
        );
        assert_eq!(
            scripted.choose_action(&battle, &request()),
            Choice::Move("tackle".into())
        );
    }
}
