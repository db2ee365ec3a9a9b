//! The serialized writer. All inserts and updates go through one connection.
//!
//! The lock is a plain `std::sync::Mutex`: every critical section is a short
//! SQLite statement, so callers may use the writer from worker threads and
//! from inside a tokio runtime alike.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use palate_core::errors::PalateResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open (creating if needed) the database file and apply writer pragmas.
    pub fn open(path: &Path) -> PalateResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> PalateResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> PalateResult<Self> {
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` while holding the write lock.
    pub fn with_conn<F, T>(&self, f: F) -> PalateResult<T>
    where
        F: FnOnce(&Connection) -> PalateResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write lock poisoned: {e}")))?;
        f(&guard)
    }
}
