//! v001: users, searches, interactions.

use rusqlite::Connection;

use palate_core::errors::PalateResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> PalateResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            user_id           INTEGER PRIMARY KEY AUTOINCREMENT,
            username          TEXT NOT NULL UNIQUE,
            temperature_bias  REAL,
            tourist_bias      REAL,
            emotion           TEXT,
            other_preferences TEXT NOT NULL DEFAULT '{}'
        );

        CREATE TABLE IF NOT EXISTS searches (
            search_id    INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      INTEGER NOT NULL,
            cuisines     TEXT NOT NULL DEFAULT '[]',
            tastes       TEXT NOT NULL DEFAULT '[]',
            diet         TEXT NOT NULL DEFAULT 'None',
            price_range  TEXT NOT NULL DEFAULT '[1,4]',
            location     TEXT NOT NULL DEFAULT '',
            emotion      TEXT,
            timestamp    TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(user_id)
        );

        CREATE INDEX IF NOT EXISTS idx_searches_user_time ON searches(user_id, timestamp);

        CREATE TABLE IF NOT EXISTS interactions (
            interaction_id  INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         INTEGER NOT NULL,
            cuisine         TEXT NOT NULL,
            feedback        INTEGER NOT NULL CHECK (feedback IN (0, 1)),
            timestamp       TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(user_id)
        );

        CREATE INDEX IF NOT EXISTS idx_interactions_user ON interactions(user_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
