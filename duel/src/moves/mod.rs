mod active_move;
mod behavior;

pub use active_move::ActiveMove;
pub use behavior::{
    MoveBehavior,
    move_behavior,
};
