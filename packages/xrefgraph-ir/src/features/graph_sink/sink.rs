//! Graph Sink
//!
//! Single writer to the graph store. Walker threads share one `GraphSink`:
//!
//! ```text
//! worker ──┐
//! worker ──┼─► identity caches (DashMap, lock-free hits)
//! worker ──┘          │ miss
//!                     ▼
//!             Mutex<GraphStore> ── every store mutation
//! ```
//!
//! A cache miss takes the store lock and re-checks the cache before inserting,
//! so each symbol identity and file path is inserted exactly once per run.

use std::time::Instant;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};
use xrefgraph_storage::{
    DefinitionKind, FileId, GraphStore, ReferenceId, ReferenceKind, SourceRange, SymbolId,
    SymbolKind,
};

use super::stats::{IndexStats, SinkCounters};
use crate::config::IndexerConfig;
use crate::errors::{IndexError, Result};
use crate::features::name_encoding::serialize_name;
use crate::shared::models::Span;

pub struct GraphSink<S: GraphStore> {
    store: Mutex<S>,

    /// prefix + name + postfix → id
    symbols: DashMap<String, SymbolId>,

    /// path → id
    files: DashMap<String, FileId>,

    counters: SinkCounters,
    file_language: String,
    started: Instant,
}

impl<S: GraphStore> GraphSink<S> {
    /// Take ownership of `store`, clear it if configured, and begin the run
    /// transaction.
    pub fn open(mut store: S, config: &IndexerConfig) -> Result<Self> {
        if config.clear_store {
            store.clear()?;
        }
        store.begin_transaction()?;
        debug!("Graph store opened (clear={})", config.clear_store);

        Ok(Self {
            store: Mutex::new(store),
            symbols: DashMap::new(),
            files: DashMap::new(),
            counters: SinkCounters::default(),
            file_language: config.file_language.clone(),
            started: Instant::now(),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Symbols
    // ═══════════════════════════════════════════════════════════════════════

    /// Id for the symbol `prefix + name + postfix`, inserting it on first use.
    pub fn resolve_symbol(
        &self,
        name: &str,
        kind: SymbolKind,
        prefix: &str,
        postfix: &str,
    ) -> Result<SymbolId> {
        if name.trim().is_empty() {
            return Err(IndexError::InvalidName(name.to_string()));
        }

        let key = format!("{}{}{}", prefix, name, postfix);
        if let Some(id) = self.symbols.get(&key).map(|entry| *entry.value()) {
            return Ok(id);
        }

        let mut store = self.store.lock();
        if let Some(id) = self.symbols.get(&key).map(|entry| *entry.value()) {
            return Ok(id);
        }

        let id = store.insert_symbol(&serialize_name(name, prefix, postfix))?;
        if id <= 0 {
            return Err(IndexError::invalid_id("symbol", id));
        }
        store.set_symbol_kind(id, kind)?;
        store.set_symbol_definition_kind(id, DefinitionKind::Explicit)?;

        self.symbols.insert(key, id);
        SinkCounters::bump(&self.counters.symbols);
        trace!("Minted symbol {} ({}) for {}", id, kind.as_str(), name);
        Ok(id)
    }

    pub fn attach_symbol_location(&self, symbol_id: SymbolId, path: &str, span: Span) -> Result<()> {
        let range = self.range_for("symbol", symbol_id, path, span)?;
        self.store.lock().insert_symbol_location(symbol_id, &range)?;
        Ok(())
    }

    pub fn attach_symbol_signature_location(
        &self,
        symbol_id: SymbolId,
        path: &str,
        span: Span,
    ) -> Result<()> {
        let range = self.range_for("symbol", symbol_id, path, span)?;
        self.store
            .lock()
            .insert_symbol_signature_location(symbol_id, &range)?;
        Ok(())
    }

    /// Occurrence of `symbol_id`'s name at `span`
    pub fn attach_qualifier_location(
        &self,
        symbol_id: SymbolId,
        path: &str,
        span: Span,
    ) -> Result<()> {
        let range = self.range_for("symbol", symbol_id, path, span)?;
        self.store.lock().insert_qualifier_location(symbol_id, &range)?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Files
    // ═══════════════════════════════════════════════════════════════════════

    /// Language recorded for lazily registered files
    pub fn file_language(&self) -> &str {
        &self.file_language
    }

    pub fn resolve_file(&self, path: &str, language: &str) -> Result<FileId> {
        if path.trim().is_empty() {
            return Err(IndexError::UnresolvedFile(path.to_string()));
        }
        if let Some(id) = self.files.get(path).map(|entry| *entry.value()) {
            return Ok(id);
        }

        let mut store = self.store.lock();
        if let Some(id) = self.files.get(path).map(|entry| *entry.value()) {
            return Ok(id);
        }

        let id = store.insert_file(path)?;
        if id <= 0 {
            return Err(IndexError::UnresolvedFile(path.to_string()));
        }
        store.set_file_language(id, language)?;

        self.files.insert(path.to_string(), id);
        SinkCounters::bump(&self.counters.files);
        debug!("Registered file {} as {}", path, id);
        Ok(id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // References
    // ═══════════════════════════════════════════════════════════════════════

    /// Insert a reference edge. Never deduplicated.
    pub fn record_reference(
        &self,
        source: SymbolId,
        target: SymbolId,
        kind: ReferenceKind,
    ) -> Result<ReferenceId> {
        if source <= 0 {
            return Err(IndexError::invalid_id("reference source", source));
        }
        if target <= 0 {
            return Err(IndexError::invalid_id("reference target", target));
        }

        let id = self.store.lock().insert_reference(source, target, kind)?;
        if id <= 0 {
            return Err(IndexError::invalid_id("reference", id));
        }
        SinkCounters::bump(&self.counters.references);
        Ok(id)
    }

    pub fn attach_reference_location(
        &self,
        reference_id: ReferenceId,
        path: &str,
        span: Span,
    ) -> Result<()> {
        let range = self.range_for("reference", reference_id, path, span)?;
        self.store
            .lock()
            .insert_reference_location(reference_id, &range)?;
        Ok(())
    }

    pub fn mark_ambiguous(&self, reference_id: ReferenceId) -> Result<()> {
        if reference_id <= 0 {
            return Err(IndexError::invalid_id("reference", reference_id));
        }
        self.store.lock().mark_reference_ambiguous(reference_id)?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Diagnostics
    // ═══════════════════════════════════════════════════════════════════════

    /// Record an indexing problem. Does not interrupt the walk.
    pub fn record_diagnostic(
        &self,
        message: &str,
        fatal: bool,
        path: Option<&str>,
        span: Span,
    ) -> Result<()> {
        SinkCounters::bump(&self.counters.errors);
        warn!(
            "{} ({}:{}:{})",
            message,
            path.unwrap_or("<unknown>"),
            span.start_line + 1,
            span.start_col + 1
        );

        let range = match path {
            Some(path) => Some(span.to_range(self.resolve_file(path, &self.file_language)?)),
            None => None,
        };
        self.store
            .lock()
            .insert_error(message, fatal, range.as_ref())?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lifecycle
    // ═══════════════════════════════════════════════════════════════════════

    /// Counters so far
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            elapsed: self.started.elapsed(),
            ..self.counters.snapshot()
        }
    }

    /// Commit the run transaction and close the store.
    pub fn finish(self) -> Result<IndexStats> {
        let stats = self.stats();
        let mut store = self.store.into_inner();
        store.commit_transaction()?;
        store.close()?;
        debug!("Graph store committed and closed");
        Ok(stats)
    }

    fn range_for(&self, what: &'static str, id: i64, path: &str, span: Span) -> Result<SourceRange> {
        if id <= 0 {
            return Err(IndexError::invalid_id(what, id));
        }
        let file_id = self.resolve_file(path, &self.file_language)?;
        Ok(span.to_range(file_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrefgraph_storage::{InMemoryGraphStore, LocationOwner};

    fn sink() -> (InMemoryGraphStore, GraphSink<InMemoryGraphStore>) {
        let store = InMemoryGraphStore::new();
        let sink = GraphSink::open(store.clone(), &IndexerConfig::new("unused.db")).unwrap();
        (store, sink)
    }

    #[test]
    fn test_resolve_symbol_inserts_once() {
        let (store, sink) = sink();
        let a = sink
            .resolve_symbol("N.C.M", SymbolKind::Method, "public void", "()")
            .unwrap();
        let b = sink
            .resolve_symbol("N.C.M", SymbolKind::Method, "public void", "()")
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(store.symbol_insert_calls(), 1);
        assert_eq!(sink.stats().symbols, 1);

        let stored = store.find_symbol("N.C.M").unwrap();
        assert_eq!(stored.kind, Some(SymbolKind::Method));
        assert_eq!(stored.definition_kind, Some(DefinitionKind::Explicit));
    }

    #[test]
    fn test_overloads_are_distinct_symbols() {
        let (_, sink) = sink();
        let a = sink
            .resolve_symbol("N.C.M", SymbolKind::Method, "public void", "(int x)")
            .unwrap();
        let b = sink
            .resolve_symbol("N.C.M", SymbolKind::Method, "public void", "(string x)")
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(sink.stats().symbols, 2);
    }

    #[test]
    fn test_blank_name_rejected() {
        let (store, sink) = sink();
        let err = sink
            .resolve_symbol("  ", SymbolKind::Class, "", "")
            .unwrap_err();
        assert!(matches!(err, IndexError::InvalidName(_)));
        assert_eq!(store.symbol_insert_calls(), 0);
    }

    #[test]
    fn test_location_registers_file_lazily() {
        let (store, sink) = sink();
        let id = sink.resolve_symbol("N.C", SymbolKind::Class, "", "").unwrap();
        sink.attach_symbol_location(id, "/src/a.cs", Span::new(2, 4, 2, 9))
            .unwrap();
        sink.attach_qualifier_location(id, "/src/a.cs", Span::new(7, 0, 7, 5))
            .unwrap();

        let files = store.files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].language.as_deref(), Some("cpp"));
        assert_eq!(sink.stats().files, 1);

        let ranges = store.locations_of(LocationOwner::Symbol(id));
        assert_eq!(ranges, vec![SourceRange::new(files[0].id, 3, 5, 3, 9)]);
        assert_eq!(store.locations_of(LocationOwner::Qualifier(id)).len(), 1);
    }

    #[test]
    fn test_invalid_ids_are_fatal() {
        let (_, sink) = sink();
        let span = Span::new(0, 0, 0, 1);
        assert!(matches!(
            sink.attach_symbol_location(0, "/a.cs", span),
            Err(IndexError::InvalidId { .. })
        ));
        assert!(matches!(
            sink.record_reference(1, -3, ReferenceKind::Usage),
            Err(IndexError::InvalidId { id: -3, .. })
        ));
        assert!(matches!(
            sink.attach_reference_location(0, "/a.cs", span),
            Err(IndexError::InvalidId { .. })
        ));
    }

    #[test]
    fn test_references_are_not_deduplicated() {
        let (store, sink) = sink();
        let a = sink.resolve_symbol("A", SymbolKind::Class, "", "").unwrap();
        let b = sink.resolve_symbol("B", SymbolKind::Class, "", "").unwrap();

        let r1 = sink.record_reference(a, b, ReferenceKind::TypeUsage).unwrap();
        let r2 = sink.record_reference(a, b, ReferenceKind::TypeUsage).unwrap();
        assert_ne!(r1, r2);
        assert_eq!(sink.stats().references, 2);

        sink.mark_ambiguous(r2).unwrap();
        sink.mark_ambiguous(r2).unwrap();
        let refs = store.references();
        assert!(!refs[0].ambiguous);
        assert!(refs[1].ambiguous);
    }

    #[test]
    fn test_diagnostic_counts_and_persists() {
        let (store, sink) = sink();
        sink.record_diagnostic(
            "Unable to determine type-information for 'x'",
            false,
            Some("/a.cs"),
            Span::new(1, 2, 1, 3),
        )
        .unwrap();

        assert_eq!(sink.stats().errors, 1);
        let errors = store.errors();
        assert_eq!(errors.len(), 1);
        assert!(!errors[0].fatal);
        assert_eq!(errors[0].range.map(|r| r.start_line), Some(2));
    }

    #[test]
    fn test_finish_commits_and_closes() {
        let (store, sink) = sink();
        sink.resolve_symbol("N", SymbolKind::Namespace, "", "").unwrap();
        let stats = sink.finish().unwrap();

        assert_eq!(stats.symbols, 1);
        assert_eq!(store.commits(), 1);
        assert!(store.is_closed());
    }

    #[test]
    fn test_concurrent_resolution_mints_once() {
        use rayon::prelude::*;

        let (store, sink) = sink();
        let ids: Vec<SymbolId> = (0..256)
            .into_par_iter()
            .map(|n| {
                sink.resolve_symbol(&format!("N.T{}", n % 8), SymbolKind::Class, "", "")
                    .unwrap()
            })
            .collect();

        assert_eq!(store.symbol_insert_calls(), 8);
        assert_eq!(sink.stats().symbols, 8);
        let mut distinct = ids;
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), 8);
    }
}
