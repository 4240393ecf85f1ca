//! Domain layer for the cross-reference graph store
//!
//! # Domain Models
//!
//! - `SerializedName`: structured, JSON-encoded symbol identity
//! - `SymbolKind` / `ReferenceKind` / `DefinitionKind`
//! - `SourceRange`: 1-based range inside a registered file
//!
//! # Port Trait
//!
//! - `GraphStore`: the write surface the indexer drives
//!
//! # Examples
//!
//! ```rust,ignore
//! use xrefgraph_storage::domain::{GraphStore, NameElement, ReferenceKind, SerializedName};
//!
//! fn example(store: &mut impl GraphStore) -> xrefgraph_storage::Result<()> {
//!     store.begin_transaction()?;
//!     let a = store.insert_symbol(&SerializedName::new(vec![NameElement::new("A")]))?;
//!     let b = store.insert_symbol(&SerializedName::new(vec![NameElement::new("B")]))?;
//!     store.insert_reference(a, b, ReferenceKind::Usage)?;
//!     store.commit_transaction()
//! }
//! ```

pub mod models;
pub mod ports;

pub use models::{
    DefinitionKind, FileId, LocationOwner, NameElement, ReferenceId, ReferenceKind,
    SerializedName, SourceRange, StoreCounts, StoredError, StoredFile, StoredLocation,
    StoredReference, StoredSymbol, SymbolId, SymbolKind,
};
pub use ports::GraphStore;
