//! In-Memory Graph Store (for testing)
//!
//! Vec/HashMap backed implementation with read-back accessors. Clones share
//! state, so a test can hand one handle to the indexer and inspect another.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{
    DefinitionKind, FileId, GraphStore, LocationOwner, ReferenceId, ReferenceKind,
    SerializedName, SourceRange, StoreCounts, StoredError, StoredFile, StoredLocation,
    StoredReference, StoredSymbol, SymbolId, SymbolKind,
};
use crate::{Result, StorageError};

#[derive(Debug, Default)]
struct MemoryState {
    symbols: Vec<StoredSymbol>,
    symbol_ids: HashMap<SerializedName, SymbolId>,
    files: Vec<StoredFile>,
    file_ids: HashMap<String, FileId>,
    references: Vec<StoredReference>,
    locations: Vec<StoredLocation>,
    errors: Vec<StoredError>,
    symbol_insert_calls: u64,
    in_transaction: bool,
    commits: u64,
    closed: bool,
}

impl MemoryState {
    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(StorageError::closed());
        }
        Ok(())
    }

    fn symbol_mut(&mut self, id: SymbolId) -> Result<&mut StoredSymbol> {
        // ids are minted as index + 1
        usize::try_from(id - 1)
            .ok()
            .and_then(|idx| self.symbols.get_mut(idx))
            .ok_or_else(|| StorageError::rejected(format!("unknown symbol id {}", id)))
    }

    fn file_mut(&mut self, id: FileId) -> Result<&mut StoredFile> {
        usize::try_from(id - 1)
            .ok()
            .and_then(|idx| self.files.get_mut(idx))
            .ok_or_else(|| StorageError::rejected(format!("unknown file id {}", id)))
    }

    fn reference_mut(&mut self, id: ReferenceId) -> Result<&mut StoredReference> {
        usize::try_from(id - 1)
            .ok()
            .and_then(|idx| self.references.get_mut(idx))
            .ok_or_else(|| StorageError::rejected(format!("unknown reference id {}", id)))
    }

    fn push_location(&mut self, owner: LocationOwner, range: &SourceRange) -> Result<()> {
        self.ensure_open()?;
        match owner {
            LocationOwner::Symbol(id) | LocationOwner::Signature(id) | LocationOwner::Qualifier(id) => {
                self.symbol_mut(id)?;
            }
            LocationOwner::Reference(id) => {
                self.reference_mut(id)?;
            }
        }
        self.file_mut(range.file_id)?;
        self.locations.push(StoredLocation {
            owner,
            range: *range,
        });
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryGraphStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> Vec<StoredSymbol> {
        self.state.lock().symbols.clone()
    }

    pub fn files(&self) -> Vec<StoredFile> {
        self.state.lock().files.clone()
    }

    pub fn references(&self) -> Vec<StoredReference> {
        self.state.lock().references.clone()
    }

    pub fn locations(&self) -> Vec<StoredLocation> {
        self.state.lock().locations.clone()
    }

    pub fn errors(&self) -> Vec<StoredError> {
        self.state.lock().errors.clone()
    }

    /// Number of `insert_symbol` calls, including ones that hit an existing name.
    pub fn symbol_insert_calls(&self) -> u64 {
        self.state.lock().symbol_insert_calls
    }

    pub fn commits(&self) -> u64 {
        self.state.lock().commits
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Find a symbol by its dotted qualified name (prefix/postfix ignored).
    pub fn find_symbol(&self, qualified_name: &str) -> Option<StoredSymbol> {
        self.state
            .lock()
            .symbols
            .iter()
            .find(|s| s.name.qualified_name() == qualified_name)
            .cloned()
    }

    pub fn locations_of(&self, owner: LocationOwner) -> Vec<SourceRange> {
        self.state
            .lock()
            .locations
            .iter()
            .filter(|l| l.owner == owner)
            .map(|l| l.range)
            .collect()
    }
}

impl GraphStore for InMemoryGraphStore {
    fn clear(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_open()?;
        let in_transaction = state.in_transaction;
        *state = MemoryState {
            in_transaction,
            ..Default::default()
        };
        Ok(())
    }

    fn begin_transaction(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_open()?;
        if state.in_transaction {
            return Err(StorageError::transaction("transaction already open"));
        }
        state.in_transaction = true;
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_open()?;
        if !state.in_transaction {
            return Err(StorageError::transaction("no open transaction"));
        }
        state.in_transaction = false;
        state.commits += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.state.lock().closed = true;
        Ok(())
    }

    fn insert_symbol(&mut self, name: &SerializedName) -> Result<SymbolId> {
        let mut state = self.state.lock();
        state.ensure_open()?;
        state.symbol_insert_calls += 1;
        if let Some(id) = state.symbol_ids.get(name) {
            return Ok(*id);
        }
        let id = state.symbols.len() as SymbolId + 1;
        state.symbols.push(StoredSymbol {
            id,
            name: name.clone(),
            kind: None,
            definition_kind: None,
        });
        state.symbol_ids.insert(name.clone(), id);
        Ok(id)
    }

    fn set_symbol_kind(&mut self, symbol_id: SymbolId, kind: SymbolKind) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_open()?;
        state.symbol_mut(symbol_id)?.kind = Some(kind);
        Ok(())
    }

    fn set_symbol_definition_kind(
        &mut self,
        symbol_id: SymbolId,
        kind: DefinitionKind,
    ) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_open()?;
        state.symbol_mut(symbol_id)?.definition_kind = Some(kind);
        Ok(())
    }

    fn insert_symbol_location(&mut self, symbol_id: SymbolId, range: &SourceRange) -> Result<()> {
        self.state
            .lock()
            .push_location(LocationOwner::Symbol(symbol_id), range)
    }

    fn insert_symbol_signature_location(
        &mut self,
        symbol_id: SymbolId,
        range: &SourceRange,
    ) -> Result<()> {
        self.state
            .lock()
            .push_location(LocationOwner::Signature(symbol_id), range)
    }

    fn insert_qualifier_location(
        &mut self,
        symbol_id: SymbolId,
        range: &SourceRange,
    ) -> Result<()> {
        self.state
            .lock()
            .push_location(LocationOwner::Qualifier(symbol_id), range)
    }

    fn insert_file(&mut self, path: &str) -> Result<FileId> {
        let mut state = self.state.lock();
        state.ensure_open()?;
        if let Some(id) = state.file_ids.get(path) {
            return Ok(*id);
        }
        let id = state.files.len() as FileId + 1;
        state.files.push(StoredFile {
            id,
            path: path.to_string(),
            language: None,
        });
        state.file_ids.insert(path.to_string(), id);
        Ok(id)
    }

    fn set_file_language(&mut self, file_id: FileId, language: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_open()?;
        state.file_mut(file_id)?.language = Some(language.to_string());
        Ok(())
    }

    fn insert_reference(
        &mut self,
        source: SymbolId,
        target: SymbolId,
        kind: ReferenceKind,
    ) -> Result<ReferenceId> {
        let mut state = self.state.lock();
        state.ensure_open()?;
        state.symbol_mut(source)?;
        state.symbol_mut(target)?;
        let id = state.references.len() as ReferenceId + 1;
        state.references.push(StoredReference {
            id,
            source,
            target,
            kind,
            ambiguous: false,
        });
        Ok(id)
    }

    fn insert_reference_location(
        &mut self,
        reference_id: ReferenceId,
        range: &SourceRange,
    ) -> Result<()> {
        self.state
            .lock()
            .push_location(LocationOwner::Reference(reference_id), range)
    }

    fn mark_reference_ambiguous(&mut self, reference_id: ReferenceId) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_open()?;
        state.reference_mut(reference_id)?.ambiguous = true;
        Ok(())
    }

    fn insert_error(
        &mut self,
        message: &str,
        fatal: bool,
        range: Option<&SourceRange>,
    ) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_open()?;
        state.errors.push(StoredError {
            message: message.to_string(),
            fatal,
            range: range.copied(),
        });
        Ok(())
    }

    fn counts(&self) -> Result<StoreCounts> {
        let state = self.state.lock();
        Ok(StoreCounts {
            symbols: state.symbols.len() as u64,
            files: state.files.len() as u64,
            references: state.references.len() as u64,
            locations: state.locations.len() as u64,
            errors: state.errors.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NameElement;
    use crate::ErrorKind;

    fn name(parts: &[&str]) -> SerializedName {
        SerializedName::new(parts.iter().map(|p| NameElement::new(*p)).collect())
    }

    #[test]
    fn test_insert_symbol_returns_existing_id() {
        let mut store = InMemoryGraphStore::new();
        let a = store.insert_symbol(&name(&["N", "A"])).unwrap();
        let again = store.insert_symbol(&name(&["N", "A"])).unwrap();
        let b = store.insert_symbol(&name(&["N", "B"])).unwrap();

        assert_eq!(a, again);
        assert_ne!(a, b);
        assert!(a > 0 && b > 0);
        assert_eq!(store.symbols().len(), 2);
        assert_eq!(store.symbol_insert_calls(), 3);
    }

    #[test]
    fn test_clones_share_state() {
        let mut writer = InMemoryGraphStore::new();
        let reader = writer.clone();
        writer.insert_file("/src/a.cs").unwrap();
        assert_eq!(reader.files().len(), 1);
    }

    #[test]
    fn test_reference_requires_known_symbols() {
        let mut store = InMemoryGraphStore::new();
        let a = store.insert_symbol(&name(&["A"])).unwrap();
        let err = store.insert_reference(a, 99, ReferenceKind::Call).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Rejected);
    }

    #[test]
    fn test_mark_ambiguous_is_idempotent() {
        let mut store = InMemoryGraphStore::new();
        let a = store.insert_symbol(&name(&["A"])).unwrap();
        let b = store.insert_symbol(&name(&["B"])).unwrap();
        let r = store.insert_reference(a, b, ReferenceKind::Call).unwrap();

        store.mark_reference_ambiguous(r).unwrap();
        store.mark_reference_ambiguous(r).unwrap();

        let refs = store.references();
        assert_eq!(refs.len(), 1);
        assert!(refs[0].ambiguous);
    }

    #[test]
    fn test_location_requires_known_file() {
        let mut store = InMemoryGraphStore::new();
        let a = store.insert_symbol(&name(&["A"])).unwrap();
        let err = store
            .insert_symbol_location(a, &SourceRange::new(5, 1, 1, 1, 2))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Rejected);

        let file = store.insert_file("/src/a.cs").unwrap();
        store
            .insert_qualifier_location(a, &SourceRange::new(file, 3, 5, 3, 9))
            .unwrap();
        assert_eq!(
            store.locations_of(LocationOwner::Qualifier(a)),
            vec![SourceRange::new(file, 3, 5, 3, 9)]
        );
    }

    #[test]
    fn test_transaction_lifecycle() {
        let mut store = InMemoryGraphStore::new();
        assert_eq!(
            store.commit_transaction().unwrap_err().kind,
            ErrorKind::Transaction
        );
        store.begin_transaction().unwrap();
        assert!(store.begin_transaction().is_err());
        store.commit_transaction().unwrap();
        assert_eq!(store.commits(), 1);
    }

    #[test]
    fn test_closed_store_rejects_writes() {
        let mut store = InMemoryGraphStore::new();
        store.close().unwrap();
        assert!(store.is_closed());
        let err = store.insert_file("/src/a.cs").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Rejected);
    }

    #[test]
    fn test_clear_resets_rows() {
        let mut store = InMemoryGraphStore::new();
        store.insert_symbol(&name(&["A"])).unwrap();
        store.insert_error("boom", false, None).unwrap();
        store.clear().unwrap();
        assert_eq!(store.counts().unwrap(), StoreCounts::default());
        // ids restart after a clear
        assert_eq!(store.insert_symbol(&name(&["B"])).unwrap(), 1);
    }
}
