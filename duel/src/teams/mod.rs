mod mon;
mod team;

pub use mon::MonData;
pub use team::TeamData;
