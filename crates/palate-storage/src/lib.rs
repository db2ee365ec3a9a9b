//! # palate-storage
//!
//! SQLite persistence layer: users, searches, interactions, and the single
//! persisted classifier. One serialized write connection, a small read pool
//! for file-backed databases, versioned migrations.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use palate_core::errors::{PalateError, StorageError};

/// Wrap a SQLite failure message in the crate error type.
pub(crate) fn to_storage_err(message: impl Into<String>) -> PalateError {
    PalateError::Storage(StorageError::SqliteError {
        message: message.into(),
    })
}

/// A stored column that could not be decoded.
pub(crate) fn corrupt_row(table: &str, details: impl Into<String>) -> PalateError {
    PalateError::Storage(StorageError::CorruptRow {
        table: table.to_string(),
        details: details.into(),
    })
}
