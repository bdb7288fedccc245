mod hash;
mod math;

pub use duel_data::{
    Id,
    Identifiable,
};
pub use hash::{
    FastHashMap,
    FastHashSet,
};
pub use math::{
    gf_round,
    modify_by_percent,
};
