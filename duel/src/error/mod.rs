mod battle_error;
mod lookup;

pub use battle_error::{
    GeneralError,
    InvariantViolationError,
    NotFoundError,
    general_error,
    invariant_violation_error,
    not_found_error,
};
pub use lookup::OrNotFound;
