//! Persisted form of a fitted forest.

use palate_core::errors::{ModelError, PalateError, PalateResult};
use palate_core::models::StoredModel;

use crate::RandomForest;

impl RandomForest {
    /// Serialize into an artifact tagged with the current feature schema.
    pub fn to_stored(&self, trained_rows: usize) -> PalateResult<StoredModel> {
        if self.trees().is_empty() {
            return Err(PalateError::ModelNotLoaded);
        }
        let payload = serde_json::to_vec(self)?;
        Ok(StoredModel::current(payload, trained_rows))
    }

    /// Decode an artifact, refusing other schemas and malformed trees.
    pub fn from_stored(stored: &StoredModel) -> PalateResult<Self> {
        stored.ensure_current_schema()?;
        let forest: RandomForest =
            serde_json::from_slice(&stored.payload).map_err(|e| ModelError::CorruptArtifact {
                reason: e.to_string(),
            })?;
        forest
            .check_integrity()
            .map_err(|reason| ModelError::CorruptArtifact { reason })?;
        Ok(forest)
    }
}
