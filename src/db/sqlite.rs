use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension};

use super::DatabaseError;

/// Wait this long on a locked database before failing a read.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial",
    sql: include_str!("../../resources/migrations/001_initial.sql"),
}];

/// Open the record store at `path`, bringing its schema up to date.
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    prepare(Connection::open(path)?)
}

/// Private in-memory store with the full schema.
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    prepare(Connection::open_in_memory()?)
}

fn prepare(conn: Connection) -> Result<Connection, DatabaseError> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    // in-memory databases answer "memory"
    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    tracing::trace!(mode, "Journal mode set");
    run_migrations(&conn)?;
    Ok(conn)
}

/// Apply every migration newer than the stored schema version, each in
/// its own transaction. Returns the resulting version.
pub fn run_migrations(conn: &Connection) -> Result<i64, DatabaseError> {
    let mut current = schema_version(conn)?;

    for migration in MIGRATIONS.iter().filter(move |m| m.version > current) {
        tracing::info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        apply(conn, migration).map_err(|e| DatabaseError::MigrationFailed {
            version: migration.version,
            reason: e.to_string(),
        })?;
        current = migration.version;
    }

    Ok(current)
}

fn apply(conn: &Connection, migration: &Migration) -> Result<(), rusqlite::Error> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql)?;
    tx.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        params![migration.version],
    )?;
    tx.commit()
}

/// Stored schema version; 0 for a store that has never been migrated.
pub fn schema_version(conn: &Connection) -> Result<i64, DatabaseError> {
    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !has_table {
        return Ok(0);
    }

    let version: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}
