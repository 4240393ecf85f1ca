//! xrefgraph-storage: persistent cross-reference graph
//!
//! The write side of a code-navigation index: symbols identified by their
//! serialized name, files identified by path, typed references between
//! symbols, and the source locations of all of them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use xrefgraph_storage::{GraphStore, SqliteGraphStore};
//!
//! let mut store = SqliteGraphStore::open("index.sqlite")?;
//! store.clear()?;
//! store.begin_transaction()?;
//! let file = store.insert_file("/src/Program.cs")?;
//! store.set_file_language(file, "cpp")?;
//! // ... symbols, references, locations
//! store.commit_transaction()?;
//! store.close()?;
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{
    DefinitionKind, FileId, GraphStore, LocationOwner, NameElement, ReferenceId, ReferenceKind,
    SerializedName, SourceRange, StoreCounts, StoredError, StoredFile, StoredLocation,
    StoredReference, StoredSymbol, SymbolId, SymbolKind,
};
pub use infrastructure::InMemoryGraphStore;

#[cfg(feature = "sqlite")]
pub use infrastructure::SqliteGraphStore;
