use std::fmt::{
    self,
    Display,
};

use serde::{
    Deserialize,
    Serialize,
};

/// Address of a Mon in a battle.
///
/// Entities never point at each other. Every cross-reference is an index, so a cloned battle stays
/// self-consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonHandle {
    pub side: usize,
    pub position: usize,
}

impl MonHandle {
    pub const fn new(side: usize, position: usize) -> Self {
        Self { side, position }
    }

    /// The index of the opposing side.
    pub fn foe_side(&self) -> usize {
        1 - self.side
    }
}

/// An entity that can hold effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostId {
    Mon(MonHandle),
    Side(usize),
    Field,
}

impl HostId {
    /// The side the host belongs to, if any.
    pub fn side(&self) -> Option<usize> {
        match self {
            Self::Mon(mon) => Some(mon.side),
            Self::Side(side) => Some(*side),
            Self::Field => None,
        }
    }
}

impl Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mon(mon) => write!(f, "mon {},{}", mon.side, mon.position),
            Self::Side(side) => write!(f, "side {side}"),
            Self::Field => write!(f, "field"),
        }
    }
}
