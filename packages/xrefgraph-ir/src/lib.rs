/*
 * XrefGraph IR - Cross-reference graph indexer
 *
 * Feature-First Layout:
 * - shared/      : Resolved-AST models (SymbolRef, SyntaxNode, Span)
 * - features/    : Vertical slices (resolved_ast → name_encoding → interface_index → graph_sink → indexing)
 * - config/      : Indexer settings and YAML loading
 *
 * Concurrency:
 * - Rayon work-stealing, one task per file per phase
 * - DashMap identity caches, one store lock
 */

#![allow(clippy::too_many_arguments)] // Handlers thread session, path, span and ids
#![allow(clippy::module_inception)] // Module naming intentional

pub mod config;
pub mod errors;
pub mod features;
pub mod shared;

pub use config::{ConfigError, IndexerConfig, ParallelConfig};
pub use errors::{IndexError, Result};
pub use features::graph_sink::{GraphSink, IndexStats};
pub use features::indexing::Indexer;
pub use features::interface_index::InterfaceIndex;
pub use features::name_encoding::{serialize_name, EncodedName, NameEncoder};
pub use features::resolved_ast::{ResolvedAstProvider, ResolvedProject};

#[cfg(any(test, feature = "test-fixtures"))]
pub use features::resolved_ast::ProjectBuilder;

/// Index `provider` into the SQLite database configured in `config`.
#[cfg(feature = "sqlite")]
pub fn run<P>(provider: &P, config: IndexerConfig) -> Result<IndexStats>
where
    P: ResolvedAstProvider + ?Sized,
{
    Indexer::new(config).run(provider)
}
