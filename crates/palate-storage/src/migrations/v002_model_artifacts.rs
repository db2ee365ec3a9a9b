//! v002: single-row slot for the persisted classifier.

use rusqlite::Connection;

use palate_core::errors::PalateResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> PalateResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS model_artifacts (
            slot            INTEGER PRIMARY KEY CHECK (slot = 1),
            payload         BLOB NOT NULL,
            schema_version  INTEGER NOT NULL,
            feature_width   INTEGER NOT NULL,
            trained_rows    INTEGER NOT NULL,
            trained_at      TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
