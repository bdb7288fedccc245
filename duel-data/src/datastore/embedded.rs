use ahash::HashMap;
use anyhow::{
    Context,
    Result,
};
use serde::de::DeserializeOwned;

use crate::{
    DataStore,
    Id,
    MoveData,
    SpeciesData,
    TypeChart,
};

const TYPE_CHART_JSON: &str = include_str!("../../data/type-chart.json");
const MOVES_JSON: &str = include_str!("../../data/moves.json");
const SPECIES_JSON: &str = include_str!("../../data/species.json");

/// An implementation of [`DataStore`] over JSON tables compiled into the crate.
///
/// Custom tables can be loaded with [`EmbeddedDataStore::from_json`].
#[derive(Debug, Clone)]
pub struct EmbeddedDataStore {
    pub type_chart: TypeChart,
    pub moves: HashMap<Id, MoveData>,
    pub species: HashMap<Id, SpeciesData>,
}

impl EmbeddedDataStore {
    /// Creates a new data store over the built-in tables.
    pub fn new() -> Result<Self> {
        Self::from_json(TYPE_CHART_JSON, MOVES_JSON, SPECIES_JSON)
    }

    /// Creates a new data store from the given JSON documents.
    ///
    /// Moves and species are objects keyed by ID. Keys are normalized on load.
    pub fn from_json(type_chart: &str, moves: &str, species: &str) -> Result<Self> {
        Ok(Self {
            type_chart: serde_json::from_str(type_chart).context("failed to parse type chart")?,
            moves: Self::parse_table(moves).context("failed to parse moves")?,
            species: Self::parse_table(species).context("failed to parse species")?,
        })
    }

    fn parse_table<T>(json: &str) -> Result<HashMap<Id, T>>
    where
        T: DeserializeOwned,
    {
        let table: HashMap<String, T> = serde_json::from_str(json)?;
        Ok(table
            .into_iter()
            .map(|(key, value)| (Id::from(key), value))
            .collect())
    }
}

impl DataStore for EmbeddedDataStore {
    fn all_move_ids(&self, filter: &dyn Fn(&MoveData) -> bool) -> Result<Vec<Id>> {
        let mut ids = self
            .moves
            .iter()
            .filter(|(_, data)| filter(data))
            .map(|(id, _)| id.clone())
            .collect::<Vec<_>>();
        ids.sort();
        Ok(ids)
    }

    fn get_type_chart(&self) -> Result<TypeChart> {
        Ok(self.type_chart.clone())
    }

    fn get_move(&self, id: &Id) -> Result<Option<MoveData>> {
        Ok(self.moves.get(id).cloned())
    }

    fn get_species(&self, id: &Id) -> Result<Option<SpeciesData>> {
        Ok(self.species.get(id).cloned())
    }
}
