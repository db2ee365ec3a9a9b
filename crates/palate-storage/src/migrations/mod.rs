//! Versioned schema migrations, applied in order inside one transaction each.

mod v001_initial_schema;
mod v002_model_artifacts;

use rusqlite::{params, Connection, OptionalExtension};

use palate_core::errors::{PalateResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> PalateResult<()>;

const MIGRATIONS: &[(u32, MigrationFn)] = &[
    (1, v001_initial_schema::migrate),
    (2, v002_model_artifacts::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Apply every migration newer than the recorded schema version.
pub fn run_migrations(conn: &Connection) -> PalateResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for &(version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(format!("migration v{version} begin: {e}")))?;
        migrate(&tx).map_err(|e| StorageError::MigrationFailed {
            version,
            reason: e.to_string(),
        })?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit()
            .map_err(|e| to_storage_err(format!("migration v{version} commit: {e}")))?;
        tracing::debug!(version, "applied schema migration");
    }

    current_version(conn)
}

/// Highest applied schema version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> PalateResult<u32> {
    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .flatten();
    Ok(version.unwrap_or(0))
}
