use anyhow::Result;

use crate::{
    Id,
    MoveData,
    SpeciesData,
    TypeChart,
};

/// Collection of tables for all resource data.
///
/// This trait can be implemented for different data sources. Lookups are by normalized ID.
pub trait DataStore: Send + Sync {
    /// Gets all move IDs, applying the given filter on the underlying data.
    fn all_move_ids(&self, filter: &dyn Fn(&MoveData) -> bool) -> Result<Vec<Id>>;

    /// Gets the type chart.
    fn get_type_chart(&self) -> Result<TypeChart>;

    /// Gets a move by ID.
    fn get_move(&self, id: &Id) -> Result<Option<MoveData>>;
    /// Gets a species by ID.
    fn get_species(&self, id: &Id) -> Result<Option<SpeciesData>>;

    /// Gets a move by name.
    fn get_move_by_name(&self, name: &str) -> Result<Option<MoveData>> {
        self.get_move(&Id::from(name))
    }

    /// Gets a species by name.
    fn get_species_by_name(&self, name: &str) -> Result<Option<SpeciesData>> {
        self.get_species(&Id::from(name))
    }
}
