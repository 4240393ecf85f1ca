//! Resolved-AST Provider Port
//!
//! Parsing and semantic binding happen elsewhere; the indexer only reads
//! their results through this trait.

use crate::shared::models::{CompilationUnit, SemanticSymbol, SymbolRef};

/// Source of compilation units and their bound symbols.
///
/// Shared read-only by every walker thread.
pub trait ResolvedAstProvider: Sync {
    fn units(&self) -> &[CompilationUnit];

    /// Symbol behind a reference; `None` for a dangling reference
    fn symbol(&self, id: SymbolRef) -> Option<&SemanticSymbol>;

    /// Name of the assembly being indexed
    fn analyzed_assembly(&self) -> &str;

    /// Member of `implementor` that implements `interface_member`
    fn find_implementation(
        &self,
        implementor: SymbolRef,
        interface_member: SymbolRef,
    ) -> Option<SymbolRef>;

    /// Whether `id` is declared outside the analyzed assembly
    fn is_external(&self, id: SymbolRef) -> bool {
        match self.symbol(id) {
            Some(symbol) => symbol.assembly.as_deref() != Some(self.analyzed_assembly()),
            None => true,
        }
    }
}
