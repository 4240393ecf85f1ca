//! SQLite schema for the cross-reference graph

pub(super) const PRAGMAS: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA foreign_keys = ON;
";

pub(super) const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS symbol (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        serialized_name TEXT NOT NULL UNIQUE,
        kind TEXT,
        definition_kind TEXT
    );

    CREATE TABLE IF NOT EXISTS file (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        path TEXT NOT NULL UNIQUE,
        language TEXT
    );

    CREATE TABLE IF NOT EXISTS symbol_reference (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        source_id INTEGER NOT NULL REFERENCES symbol(id),
        target_id INTEGER NOT NULL REFERENCES symbol(id),
        kind TEXT NOT NULL,
        ambiguous INTEGER NOT NULL DEFAULT 0
    );

    CREATE INDEX IF NOT EXISTS idx_reference_source ON symbol_reference(source_id);
    CREATE INDEX IF NOT EXISTS idx_reference_target ON symbol_reference(target_id);

    CREATE TABLE IF NOT EXISTS symbol_location (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        symbol_id INTEGER NOT NULL REFERENCES symbol(id),
        role TEXT NOT NULL,
        file_id INTEGER NOT NULL REFERENCES file(id),
        start_line INTEGER NOT NULL,
        start_col INTEGER NOT NULL,
        end_line INTEGER NOT NULL,
        end_col INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_symbol_location_symbol ON symbol_location(symbol_id);

    CREATE TABLE IF NOT EXISTS reference_location (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        reference_id INTEGER NOT NULL REFERENCES symbol_reference(id),
        file_id INTEGER NOT NULL REFERENCES file(id),
        start_line INTEGER NOT NULL,
        start_col INTEGER NOT NULL,
        end_line INTEGER NOT NULL,
        end_col INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS diagnostic (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        message TEXT NOT NULL,
        fatal INTEGER NOT NULL,
        file_id INTEGER REFERENCES file(id),
        start_line INTEGER,
        start_col INTEGER,
        end_line INTEGER,
        end_col INTEGER
    );
";

/// Child tables first so foreign keys hold while clearing.
pub(super) const CLEAR_TABLES: &str = "
    DELETE FROM diagnostic;
    DELETE FROM reference_location;
    DELETE FROM symbol_location;
    DELETE FROM symbol_reference;
    DELETE FROM file;
    DELETE FROM symbol;
";
