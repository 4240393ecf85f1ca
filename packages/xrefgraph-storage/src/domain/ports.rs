//! Graph Store Port (Trait Interface)
//!
//! Port/Adapter pattern for backend flexibility:
//! - Indexing runs: SQLite (single file database)
//! - Testing: InMemory (inspectable, fast unit tests)

use super::models::{
    DefinitionKind, FileId, ReferenceId, ReferenceKind, SerializedName, SourceRange, StoreCounts,
    SymbolId, SymbolKind,
};
use crate::Result;

/// Graph Store Port
///
/// Writers call these from a single critical section; implementations need
/// not synchronize internally. Inserting an already known symbol name or file
/// path returns the existing id. References are never deduplicated.
pub trait GraphStore: Send {
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Lifecycle
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Remove every stored row.
    fn clear(&mut self) -> Result<()>;

    fn begin_transaction(&mut self) -> Result<()>;

    fn commit_transaction(&mut self) -> Result<()>;

    /// Release the backend. Later writes fail with a rejected error.
    fn close(&mut self) -> Result<()>;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Symbols
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Insert a symbol (or find the existing one) and return its id (> 0).
    fn insert_symbol(&mut self, name: &SerializedName) -> Result<SymbolId>;

    fn set_symbol_kind(&mut self, symbol_id: SymbolId, kind: SymbolKind) -> Result<()>;

    fn set_symbol_definition_kind(
        &mut self,
        symbol_id: SymbolId,
        kind: DefinitionKind,
    ) -> Result<()>;

    fn insert_symbol_location(&mut self, symbol_id: SymbolId, range: &SourceRange) -> Result<()>;

    fn insert_symbol_signature_location(
        &mut self,
        symbol_id: SymbolId,
        range: &SourceRange,
    ) -> Result<()>;

    /// Record an occurrence of a symbol's name (the span a reader clicks).
    fn insert_qualifier_location(&mut self, symbol_id: SymbolId, range: &SourceRange)
        -> Result<()>;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Files
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn insert_file(&mut self, path: &str) -> Result<FileId>;

    fn set_file_language(&mut self, file_id: FileId, language: &str) -> Result<()>;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // References
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn insert_reference(
        &mut self,
        source: SymbolId,
        target: SymbolId,
        kind: ReferenceKind,
    ) -> Result<ReferenceId>;

    fn insert_reference_location(
        &mut self,
        reference_id: ReferenceId,
        range: &SourceRange,
    ) -> Result<()>;

    /// Flag a reference as one of several candidates. Idempotent.
    fn mark_reference_ambiguous(&mut self, reference_id: ReferenceId) -> Result<()>;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Diagnostics
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn insert_error(
        &mut self,
        message: &str,
        fatal: bool,
        range: Option<&SourceRange>,
    ) -> Result<()>;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Read-back
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn counts(&self) -> Result<StoreCounts>;
}
