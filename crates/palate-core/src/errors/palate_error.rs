use super::{ConfigError, ModelError, StorageError};
use crate::models::UserId;

/// Top-level error for every Palate subsystem.
#[derive(Debug, thiserror::Error)]
pub enum PalateError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// A user or search row was required but not found.
    #[error("missing user data: {details}")]
    MissingUserData { details: String },

    /// Training was attempted with zero usable rows.
    #[error("insufficient data for training: {rows} usable rows")]
    InsufficientData { rows: usize },

    /// Prediction was requested before any model was trained or loaded.
    #[error("model not loaded: no classifier has been trained or loaded yet")]
    ModelNotLoaded,

    /// A persisted model was built against a different feature schema.
    #[error("model schema mismatch: expected v{expected_version}/{expected_width}, found v{found_version}/{found_width}")]
    SchemaMismatch {
        expected_version: u32,
        expected_width: usize,
        found_version: u32,
        found_width: usize,
    },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("background worker error: {0}")]
    Worker(String),
}

impl PalateError {
    /// No user row for `user_id`.
    pub fn missing_user(user_id: UserId) -> Self {
        Self::MissingUserData {
            details: format!("no user data found for user_id {user_id}"),
        }
    }

    /// No search row for `user_id`.
    pub fn missing_search(user_id: UserId) -> Self {
        Self::MissingUserData {
            details: format!("no recent searches found for user_id {user_id}"),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PalateError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

pub type PalateResult<T> = Result<T, PalateError>;
