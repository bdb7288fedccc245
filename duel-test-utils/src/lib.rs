mod error_assert;
mod log_assert;
mod rng;
mod test_battle_builder;

pub use error_assert::{
    assert_error_message,
    assert_error_message_contains,
};
pub use log_assert::assert_new_logs_eq;
pub use rng::{
    ControlledRandomNumberGenerator,
    get_controlled_rng_for_battle,
};
pub use test_battle_builder::{
    TestBattleBuilder,
    test_mon,
    test_team,
};
