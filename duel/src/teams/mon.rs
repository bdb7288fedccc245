use duel_data::{
    BoostTable,
    StatTable,
    Status,
};
use serde::{
    Deserialize,
    Serialize,
};

fn default_level() -> u8 {
    100
}

/// Data about a specific Mon on a team.
///
/// Battle state that a protocol layer may already know, such as current HP, status or boosts,
/// can be supplied here so that a battle can start mid-game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonData {
    /// Nickname.
    ///
    /// If empty, the species name is used.
    #[serde(default)]
    pub name: String,
    /// Species name.
    pub species: String,
    /// Level, typically between 1 and 100.
    #[serde(default = "default_level")]
    pub level: u8,
    /// Ability. Defaults to the species' first ability.
    #[serde(default)]
    pub ability: Option<String>,
    /// Held item.
    #[serde(default)]
    pub item: Option<String>,
    /// Moves.
    pub moves: Vec<String>,
    /// Effort values. Defaults to 85 in every stat.
    #[serde(default)]
    pub evs: Option<StatTable>,
    /// Individual values. Defaults to 31 in every stat.
    #[serde(default)]
    pub ivs: Option<StatTable>,
    /// Current HP. Defaults to full.
    #[serde(default)]
    pub hp: Option<u16>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub boosts: BoostTable,
}

impl MonData {
    /// A Mon of the given species with every optional field left to its default.
    pub fn new(species: &str, moves: &[&str]) -> Self {
        Self {
            name: String::new(),
            species: species.to_owned(),
            level: default_level(),
            ability: None,
            item: None,
            moves: moves.iter().map(|name| (*name).to_owned()).collect(),
            evs: None,
            ivs: None,
            hp: None,
            status: None,
            boosts: BoostTable::default(),
        }
    }
}
