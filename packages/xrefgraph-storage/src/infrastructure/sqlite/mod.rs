//! SQLite Graph Store
//!
//! File-based persistent storage for one indexing run. The caller drives a
//! single explicit transaction (`begin_transaction` .. `commit_transaction`)
//! around all writes.

mod schema;

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

use crate::domain::{
    DefinitionKind, FileId, GraphStore, ReferenceId, ReferenceKind, SerializedName, SourceRange,
    StoreCounts, SymbolId, SymbolKind,
};
use crate::{Result, StorageError};

/// SQLite-backed GraphStore implementation
pub struct SqliteGraphStore {
    conn: Option<Connection>,
}

impl SqliteGraphStore {
    /// Open (or create) a database at the given path
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        debug!(path = %db_path.display(), "opening graph database");
        Self::init(Connection::open(db_path)?)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(schema::PRAGMAS)?;
        conn.execute_batch(schema::CREATE_TABLES)?;
        Ok(Self { conn: Some(conn) })
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(StorageError::closed)
    }

    fn insert_symbol_location_row(
        &self,
        symbol_id: SymbolId,
        role: &str,
        range: &SourceRange,
    ) -> Result<()> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "INSERT INTO symbol_location (symbol_id, role, file_id, start_line, start_col, end_line, end_col)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        stmt.execute(params![
            symbol_id,
            role,
            range.file_id,
            range.start_line,
            range.start_col,
            range.end_line,
            range.end_col
        ])?;
        Ok(())
    }

    fn expect_one_row(changed: usize, what: &str, id: i64) -> Result<()> {
        if changed == 0 {
            return Err(StorageError::rejected(format!("unknown {} id {}", what, id)));
        }
        Ok(())
    }

    fn count(conn: &Connection, table: &str) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let n: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(n as u64)
    }
}

impl GraphStore for SqliteGraphStore {
    fn clear(&mut self) -> Result<()> {
        self.conn()?.execute_batch(schema::CLEAR_TABLES)?;
        Ok(())
    }

    fn begin_transaction(&mut self) -> Result<()> {
        let conn = self.conn()?;
        if !conn.is_autocommit() {
            return Err(StorageError::transaction("transaction already open"));
        }
        conn.execute_batch("BEGIN TRANSACTION")?;
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<()> {
        let conn = self.conn()?;
        if conn.is_autocommit() {
            return Err(StorageError::transaction("no open transaction"));
        }
        conn.execute_batch("COMMIT")?;
        debug!("graph transaction committed");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, err)| StorageError::from(err))?;
        }
        Ok(())
    }

    fn insert_symbol(&mut self, name: &SerializedName) -> Result<SymbolId> {
        let serialized = name.to_json()?;
        let conn = self.conn()?;
        conn.prepare_cached("INSERT OR IGNORE INTO symbol (serialized_name) VALUES (?1)")?
            .execute(params![serialized])?;
        let id = conn
            .prepare_cached("SELECT id FROM symbol WHERE serialized_name = ?1")?
            .query_row(params![serialized], |row| row.get::<_, i64>(0))
            .optional()?;
        id.ok_or_else(|| StorageError::rejected(format!("symbol insert failed: {}", serialized)))
    }

    fn set_symbol_kind(&mut self, symbol_id: SymbolId, kind: SymbolKind) -> Result<()> {
        let changed = self.conn()?.execute(
            "UPDATE symbol SET kind = ?1 WHERE id = ?2",
            params![kind.as_str(), symbol_id],
        )?;
        Self::expect_one_row(changed, "symbol", symbol_id)
    }

    fn set_symbol_definition_kind(
        &mut self,
        symbol_id: SymbolId,
        kind: DefinitionKind,
    ) -> Result<()> {
        let changed = self.conn()?.execute(
            "UPDATE symbol SET definition_kind = ?1 WHERE id = ?2",
            params![kind.as_str(), symbol_id],
        )?;
        Self::expect_one_row(changed, "symbol", symbol_id)
    }

    fn insert_symbol_location(&mut self, symbol_id: SymbolId, range: &SourceRange) -> Result<()> {
        self.insert_symbol_location_row(symbol_id, "symbol", range)
    }

    fn insert_symbol_signature_location(
        &mut self,
        symbol_id: SymbolId,
        range: &SourceRange,
    ) -> Result<()> {
        self.insert_symbol_location_row(symbol_id, "signature", range)
    }

    fn insert_qualifier_location(
        &mut self,
        symbol_id: SymbolId,
        range: &SourceRange,
    ) -> Result<()> {
        self.insert_symbol_location_row(symbol_id, "qualifier", range)
    }

    fn insert_file(&mut self, path: &str) -> Result<FileId> {
        let conn = self.conn()?;
        conn.prepare_cached("INSERT OR IGNORE INTO file (path) VALUES (?1)")?
            .execute(params![path])?;
        let id = conn
            .prepare_cached("SELECT id FROM file WHERE path = ?1")?
            .query_row(params![path], |row| row.get::<_, i64>(0))?;
        Ok(id)
    }

    fn set_file_language(&mut self, file_id: FileId, language: &str) -> Result<()> {
        let changed = self.conn()?.execute(
            "UPDATE file SET language = ?1 WHERE id = ?2",
            params![language, file_id],
        )?;
        Self::expect_one_row(changed, "file", file_id)
    }

    fn insert_reference(
        &mut self,
        source: SymbolId,
        target: SymbolId,
        kind: ReferenceKind,
    ) -> Result<ReferenceId> {
        let conn = self.conn()?;
        conn.prepare_cached(
            "INSERT INTO symbol_reference (source_id, target_id, kind) VALUES (?1, ?2, ?3)",
        )?
        .execute(params![source, target, kind.as_str()])?;
        Ok(conn.last_insert_rowid())
    }

    fn insert_reference_location(
        &mut self,
        reference_id: ReferenceId,
        range: &SourceRange,
    ) -> Result<()> {
        self.conn()?
            .prepare_cached(
                "INSERT INTO reference_location (reference_id, file_id, start_line, start_col, end_line, end_col)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?
            .execute(params![
                reference_id,
                range.file_id,
                range.start_line,
                range.start_col,
                range.end_line,
                range.end_col
            ])?;
        Ok(())
    }

    fn mark_reference_ambiguous(&mut self, reference_id: ReferenceId) -> Result<()> {
        let changed = self.conn()?.execute(
            "UPDATE symbol_reference SET ambiguous = 1 WHERE id = ?1",
            params![reference_id],
        )?;
        Self::expect_one_row(changed, "reference", reference_id)
    }

    fn insert_error(
        &mut self,
        message: &str,
        fatal: bool,
        range: Option<&SourceRange>,
    ) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO diagnostic (message, fatal, file_id, start_line, start_col, end_line, end_col)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                message,
                fatal,
                range.map(|r| r.file_id),
                range.map(|r| r.start_line),
                range.map(|r| r.start_col),
                range.map(|r| r.end_line),
                range.map(|r| r.end_col)
            ],
        )?;
        Ok(())
    }

    fn counts(&self) -> Result<StoreCounts> {
        let conn = self.conn()?;
        Ok(StoreCounts {
            symbols: Self::count(conn, "symbol")?,
            files: Self::count(conn, "file")?,
            references: Self::count(conn, "symbol_reference")?,
            locations: Self::count(conn, "symbol_location")?
                + Self::count(conn, "reference_location")?,
            errors: Self::count(conn, "diagnostic")?,
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
    fn test_insert_symbol_dedups_by_serialized_name() {
        let mut store = SqliteGraphStore::in_memory().unwrap();
        let a = store.insert_symbol(&name(&["N", "A"])).unwrap();
        let again = store.insert_symbol(&name(&["N", "A"])).unwrap();
        let b = store.insert_symbol(&name(&["N", "B"])).unwrap();

        assert_eq!(a, again);
        assert_ne!(a, b);
        assert_eq!(store.counts().unwrap().symbols, 2);
    }

    #[test]
    fn test_full_write_cycle() {
        let mut store = SqliteGraphStore::in_memory().unwrap();
        store.begin_transaction().unwrap();

        let file = store.insert_file("/src/a.cs").unwrap();
        assert_eq!(store.insert_file("/src/a.cs").unwrap(), file);
        store.set_file_language(file, "cpp").unwrap();

        let a = store.insert_symbol(&name(&["A"])).unwrap();
        let b = store.insert_symbol(&name(&["B"])).unwrap();
        store.set_symbol_kind(a, SymbolKind::Class).unwrap();
        store
            .set_symbol_definition_kind(a, DefinitionKind::Explicit)
            .unwrap();
        store
            .insert_symbol_location(a, &SourceRange::new(file, 1, 1, 1, 10))
            .unwrap();
        store
            .insert_qualifier_location(b, &SourceRange::new(file, 2, 3, 2, 4))
            .unwrap();

        let r = store.insert_reference(a, b, ReferenceKind::Inheritance).unwrap();
        assert!(r > 0);
        store
            .insert_reference_location(r, &SourceRange::new(file, 1, 12, 1, 12))
            .unwrap();
        store.mark_reference_ambiguous(r).unwrap();
        store.insert_error("oops", false, None).unwrap();

        store.commit_transaction().unwrap();

        let counts = store.counts().unwrap();
        assert_eq!(counts.symbols, 2);
        assert_eq!(counts.files, 1);
        assert_eq!(counts.references, 1);
        assert_eq!(counts.locations, 3);
        assert_eq!(counts.errors, 1);
    }

    #[test]
    fn test_reference_to_unknown_symbol_fails() {
        let mut store = SqliteGraphStore::in_memory().unwrap();
        let a = store.insert_symbol(&name(&["A"])).unwrap();
        let err = store.insert_reference(a, 42, ReferenceKind::Usage).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
    }

    #[test]
    fn test_mark_unknown_reference_rejected() {
        let mut store = SqliteGraphStore::in_memory().unwrap();
        let err = store.mark_reference_ambiguous(7).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Rejected);
    }

    #[test]
    fn test_commit_without_begin() {
        let mut store = SqliteGraphStore::in_memory().unwrap();
        let err = store.commit_transaction().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transaction);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.sqlite");

        {
            let mut store = SqliteGraphStore::open(&path).unwrap();
            store.begin_transaction().unwrap();
            store.insert_symbol(&name(&["A"])).unwrap();
            store.commit_transaction().unwrap();
            store.close().unwrap();
            assert_eq!(store.insert_file("/x").unwrap_err().kind, ErrorKind::Rejected);
        }

        let mut store = SqliteGraphStore::open(&path).unwrap();
        assert_eq!(store.counts().unwrap().symbols, 1);
        store.clear().unwrap();
        assert_eq!(store.counts().unwrap(), StoreCounts::default());
    }
}
