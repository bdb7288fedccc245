use crate::{
    battle::{
        MonHandle,
        SpeedOrderable,
    },
    common::Id,
};

/// A switch action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchAction {
    pub side: usize,
    /// Position of the Mon switching in.
    pub position: usize,
    pub speed: i64,
}

impl SwitchAction {
    pub fn new(side: usize, position: usize) -> Self {
        Self {
            side,
            position,
            speed: 0,
        }
    }
}

/// A move action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAction {
    pub id: Id,
    pub mon: MonHandle,
    pub priority: i32,
    pub speed: i64,
}

impl MoveAction {
    pub fn new(mon: MonHandle, id: Id) -> Self {
        Self {
            id,
            mon,
            priority: 0,
            speed: 0,
        }
    }
}

/// An action queued for a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Switch(SwitchAction),
    Move(MoveAction),
}

impl Action {
    /// The side that chose the action.
    pub fn side(&self) -> usize {
        match self {
            Self::Switch(action) => action.side,
            Self::Move(action) => action.mon.side,
        }
    }
}

impl SpeedOrderable for Action {
    fn order(&self) -> u32 {
        match self {
            Self::Switch(_) => 0,
            Self::Move(_) => 1,
        }
    }

    fn priority(&self) -> i32 {
        match self {
            Self::Switch(_) => 0,
            Self::Move(action) => action.priority,
        }
    }

    fn speed(&self) -> i64 {
        match self {
            Self::Switch(action) => action.speed,
            Self::Move(action) => action.speed,
        }
    }
}

#[cfg(test)]
mod action_test {
    use duel_prng::RealPseudoRandomNumberGenerator;
    use pretty_assertions::assert_eq;

    use crate::battle::{
        Action,
        MonHandle,
        MoveAction,
        SpeedTieResolution,
        SwitchAction,
        speed_order::speed_sort,
    };

    fn move_action(side: usize, priority: i32, speed: i64) -> Action {
        let mut action = MoveAction::new(MonHandle::new(side, 0), "tackle".into());
        action.priority = priority;
        action.speed = speed;
        Action::Move(action)
    }

    #[test]
    fn switches_precede_moves() {
        let mut actions = vec![
            move_action(0, 3, 500),
            Action::Switch(SwitchAction::new(1, 2)),
        ];
        let mut prng = RealPseudoRandomNumberGenerator::new(Some(0));
        speed_sort(&mut actions, &mut prng, SpeedTieResolution::Keep);
        assert_eq!(actions[0], Action::Switch(SwitchAction::new(1, 2)));
    }

    #[test]
    fn priority_beats_speed() {
        let mut actions = vec![move_action(0, 0, 500), move_action(1, 1, 10)];
        let mut prng = RealPseudoRandomNumberGenerator::new(Some(0));
        speed_sort(&mut actions, &mut prng, SpeedTieResolution::Keep);
        assert_eq!(actions.iter().map(|action| action.side()).collect::<Vec<_>>(), vec![1, 0]);
    }
}
