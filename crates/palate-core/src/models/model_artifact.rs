use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{FEATURE_SCHEMA_VERSION, FEATURE_WIDTH};
use crate::errors::{PalateError, PalateResult};

/// An opaque, persisted classifier.
///
/// The store never looks inside `payload`; the schema fields let a loader
/// refuse artifacts trained against a different feature layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredModel {
    pub payload: Vec<u8>,
    pub schema_version: u32,
    pub feature_width: usize,
    pub trained_rows: usize,
    pub trained_at: DateTime<Utc>,
}

impl StoredModel {
    /// Wrap a payload trained against the current schema.
    pub fn current(payload: Vec<u8>, trained_rows: usize) -> Self {
        Self {
            payload,
            schema_version: FEATURE_SCHEMA_VERSION,
            feature_width: FEATURE_WIDTH,
            trained_rows,
            trained_at: Utc::now(),
        }
    }

    pub fn ensure_current_schema(&self) -> PalateResult<()> {
        if self.schema_version == FEATURE_SCHEMA_VERSION && self.feature_width == FEATURE_WIDTH {
            Ok(())
        } else {
            Err(PalateError::SchemaMismatch {
                expected_version: FEATURE_SCHEMA_VERSION,
                expected_width: FEATURE_WIDTH,
                found_version: self.schema_version,
                found_width: self.feature_width,
            })
        }
    }
}
