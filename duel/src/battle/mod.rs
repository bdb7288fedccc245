mod action;
mod battle;
mod battle_builder;
mod battle_options;
pub mod calculations;
mod core_battle_actions;
mod damage;
mod faint_queue;
mod field;
mod host;
mod mon;
mod move_execution;
mod outcome;
mod side;
pub mod speed_order;
mod turn_engine;

pub use action::{
    Action,
    MoveAction,
    SwitchAction,
};
pub use battle::Battle;
pub use battle_builder::BattleBuilder;
pub use battle_options::{
    BattleOptions,
    SpeedTieResolution,
};
pub use damage::calculate_damage;
pub use faint_queue::{
    FaintEntry,
    FaintQueue,
};
pub use field::Field;
pub use host::{
    HostId,
    MonHandle,
};
pub use mon::{
    Mon,
    MoveSlot,
};
pub use outcome::{
    BattleOutcome,
    DamageCause,
    DamageOutcome,
    MoveOutcome,
};
pub use side::Side;
pub use speed_order::SpeedOrderable;
pub use turn_engine::TurnState;
