//! Preference storage for license policy state.
//!
//! Policies persist a handful of string key/value pairs between runs. This
//! module defines:
//! - `PreferenceStore`: the storage seam policies are generic over.
//! - `MemoryPreferences`: a non-persistent store for tests and one-shot use.
//! - `PreferenceDb`: a SQLite-backed store with a versioned schema.
//!
//! Writes are staged with `put_string` and only become durable on `commit`.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use tracing::debug;

/// Minimum schema version we know how to handle.
///
/// `0` means "no schema yet" (fresh DB).
const MIN_SUPPORTED_SCHEMA_VERSION: i32 = 0;

/// Latest schema version this crate knows about.
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Error type for preference storage.
#[derive(Debug, Error)]
pub enum DbError {
    /// Underlying SQLite error.
    #[error("SQLite error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The database was created with a newer schema version than we support.
    #[error(
        "Unsupported schema version {found}; supported range is {min_supported}..={max_supported}"
    )]
    UnsupportedSchemaVersion { found: i32, min_supported: i32, max_supported: i32 },
}

/// Convenience result type for DB operations.
pub type DbResult<T> = Result<T, DbError>;

/// String key/value storage with explicit commit.
pub trait PreferenceStore {
    /// Read a value, seeing staged (uncommitted) writes first.
    fn get_string(&self, key: &str) -> DbResult<Option<String>>;

    /// Stage a write. Nothing is persisted until [`PreferenceStore::commit`].
    fn put_string(&mut self, key: &str, value: &str);

    /// Persist all staged writes.
    fn commit(&mut self) -> DbResult<()>;
}

/// In-memory store. Commit is a no-op.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_string(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn commit(&mut self) -> DbResult<()> {
        Ok(())
    }
}

/// SQLite-backed preference store.
pub struct PreferenceDb {
    conn: Connection,
    pending: BTreeMap<String, String>,
}

impl PreferenceDb {
    /// Open (or create) a preference database at the given path and ensure the schema exists.
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        apply_migrations(&conn)?;
        debug!(path = %path.display(), "opened preference database");
        Ok(Self { conn, pending: BTreeMap::new() })
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        apply_migrations(&conn)?;
        Ok(Self { conn, pending: BTreeMap::new() })
    }

    /// Schema version recorded in the database.
    pub fn schema_version(&self) -> DbResult<i32> {
        current_schema_version(&self.conn)
    }

    /// All committed key/value pairs, sorted by key.
    pub fn list(&self) -> DbResult<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM preferences ORDER BY key")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Number of writes waiting for `commit`.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl PreferenceStore for PreferenceDb {
    fn get_string(&self, key: &str) -> DbResult<Option<String>> {
        if let Some(value) = self.pending.get(key) {
            return Ok(Some(value.clone()));
        }
        let value = self
            .conn
            .query_row("SELECT value FROM preferences WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.pending.insert(key.to_string(), value.to_string());
    }

    fn commit(&mut self) -> DbResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )?;
            for (key, value) in &self.pending {
                stmt.execute(params![key, value])?;
            }
        }
        tx.commit()?;
        debug!(count = self.pending.len(), "committed preferences");
        self.pending.clear();
        Ok(())
    }
}

fn apply_migrations(conn: &Connection) -> DbResult<()> {
    let current_version = current_schema_version(conn)?;

    // Reject DBs created with a newer schema than we support.
    if current_version > CURRENT_SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            found: current_version,
            min_supported: MIN_SUPPORTED_SCHEMA_VERSION,
            max_supported: CURRENT_SCHEMA_VERSION,
        });
    }

    if current_version == 0 {
        conn.execute_batch(
            r#"
            BEGIN;
            CREATE TABLE IF NOT EXISTS preferences (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            PRAGMA user_version = 1;
            COMMIT;
            "#,
        )?;
    }

    Ok(())
}

/// Read the SQLite schema version from `PRAGMA user_version`.
fn current_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}
