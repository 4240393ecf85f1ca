//! Storage adapters

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::InMemoryGraphStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteGraphStore;
