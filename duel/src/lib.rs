extern crate alloc;

pub mod abilities;
pub mod battle;
pub mod common;
pub mod conditions;
pub mod decision;
pub mod dex;
pub mod effect;
pub mod error;
pub mod items;
pub mod log;
pub mod moves;
pub mod rollout;
pub mod teams;

#[cfg(test)]
mod test_util;

pub use duel_data as data;
pub use duel_prng as prng;
