mod data_store;
mod embedded;

pub use data_store::DataStore;
pub use embedded::EmbeddedDataStore;
