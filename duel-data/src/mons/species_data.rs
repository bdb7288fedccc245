use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    StatTable,
    Type,
};

/// Data about a particular species.
///
/// Species data is common to every Mon of the species. Battle state such as current HP or boosts
/// does not belong here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    /// The name of the species.
    pub name: String,
    /// The primary type of the species.
    pub primary_type: Type,
    /// The secondary type of the species, if it exists.
    pub secondary_type: Option<Type>,
    /// Base stats.
    pub base_stats: StatTable,
    /// Abilities the species can have.
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Fixed maximum HP, overriding the HP formula.
    pub max_hp: Option<u16>,
}

impl SpeciesData {
    /// The species' types, in order.
    pub fn types(&self) -> Vec<Type> {
        let mut types = vec![self.primary_type];
        types.extend(self.secondary_type);
        types
    }
}
