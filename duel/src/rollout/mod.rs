//! Outcome sampling over independent copies of a battle.

mod filler;
mod options;
mod roller;

pub use filler::{
    PoolFiller,
    RosterKey,
    UnrevealedFiller,
};
pub use options::RolloutOptions;
pub use roller::{
    BattleRoller,
    RolloutResult,
    RolloutSummary,
    run_rollout,
};
