mod accuracy;
mod move_category;
mod move_data;
mod move_flag;
mod move_target;

pub use accuracy::Accuracy;
pub use move_category::MoveCategory;
pub use move_data::{
    HitEffect,
    MoveData,
    SecondaryEffectData,
};
pub use move_flag::MoveFlag;
pub use move_target::MoveTarget;
