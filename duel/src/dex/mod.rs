use std::{
    fmt,
    sync::Arc,
};

use anyhow::{
    Context,
    Result,
};
use duel_data::{
    DataStore,
    EmbeddedDataStore,
    MoveData,
    SpeciesData,
    TypeChart,
};

use crate::{
    common::Id,
    error::OrNotFound,
};

/// Read-only access to battle data.
///
/// A dex is built once and shared by every battle, including rollout snapshots.
#[derive(Clone)]
pub struct Dex {
    data: Arc<dyn DataStore>,
    type_chart: TypeChart,
}

impl Dex {
    pub fn new(data: Arc<dyn DataStore>) -> Result<Self> {
        let type_chart = data
            .get_type_chart()
            .context("failed to load type chart")?;
        Ok(Self { data, type_chart })
    }

    /// Creates a dex over the built-in data tables.
    pub fn embedded() -> Result<Self> {
        Self::new(Arc::new(EmbeddedDataStore::new()?))
    }

    pub fn data_store(&self) -> &dyn DataStore {
        self.data.as_ref()
    }

    pub fn type_chart(&self) -> &TypeChart {
        &self.type_chart
    }

    pub fn move_data(&self, id: &Id) -> Result<MoveData> {
        self.data
            .get_move(id)?
            .or_not_found(format_args!("move {id}"))
    }

    pub fn species(&self, id: &Id) -> Result<SpeciesData> {
        self.data
            .get_species(id)?
            .or_not_found(format_args!("species {id}"))
    }
}

impl fmt::Debug for Dex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dex").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod dex_test {
    use crate::{
        dex::Dex,
        error::NotFoundError,
    };

    #[test]
    fn looks_up_moves_and_species() {
        let dex = Dex::embedded().unwrap();
        assert_eq!(dex.move_data(&"Dragon Claw".into()).unwrap().base_power, 80);
        assert_eq!(dex.species(&"vaporeon".into()).unwrap().base_stats.hp, 130);
    }

    #[test]
    fn missing_entries_are_not_found_errors() {
        let dex = Dex::embedded().unwrap();
        let error = dex.move_data(&"splash".into()).unwrap_err();
        assert!(error.downcast_ref::<NotFoundError>().is_some());
        assert_eq!(error.to_string(), "move splash not found");
    }
}
