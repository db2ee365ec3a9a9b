use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DB_PATH, DEFAULT_READ_POOL_SIZE};

/// Storage subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Read connections for the file-backed pool (clamped to 1..=8).
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            read_pool_size: DEFAULT_READ_POOL_SIZE,
        }
    }
}
