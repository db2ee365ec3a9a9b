//! Process-wide handle to the current classifier.

use std::sync::{Arc, RwLock};

use palate_core::errors::{ModelError, PalateError, PalateResult};
use palate_core::traits::IModelStorage;
use palate_features::FeatureVector;

use crate::{Classifier, RandomForest};

/// Holds the installed model behind `RwLock<Option<Arc<_>>>`.
///
/// Readers clone the `Arc` and drop the lock before running inference, so a
/// concurrent [`install`](Self::install) waits only for the pointer copy.
/// A reader sees either the old model or the new one in full.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    current: RwLock<Option<Arc<RandomForest>>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with a fitted model.
    pub fn with_model(model: RandomForest) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(model))),
        }
    }

    /// Snapshot of the installed model.
    pub fn current(&self) -> PalateResult<Option<Arc<RandomForest>>> {
        let guard = self.current.read().map_err(|e| ModelError::LockPoisoned {
            reason: e.to_string(),
        })?;
        Ok(guard.clone())
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.current(), Ok(Some(_)))
    }

    /// Replace the installed model in one write.
    pub fn install(&self, model: Arc<RandomForest>) -> PalateResult<()> {
        let mut guard = self.current.write().map_err(|e| ModelError::LockPoisoned {
            reason: e.to_string(),
        })?;
        *guard = Some(model);
        Ok(())
    }

    pub fn predict(&self, x: &FeatureVector) -> PalateResult<u8> {
        let model = self.current()?.ok_or(PalateError::ModelNotLoaded)?;
        model.predict(x)
    }

    /// Install the persisted artifact, if any. Returns whether one was loaded.
    pub fn load_from<S: IModelStorage + ?Sized>(&self, store: &S) -> PalateResult<bool> {
        let Some(stored) = store.load_model()? else {
            return Ok(false);
        };
        let forest = RandomForest::from_stored(&stored)?;
        self.install(Arc::new(forest))?;
        tracing::info!(
            trained_rows = stored.trained_rows,
            trained_at = %stored.trained_at,
            "loaded persisted model"
        );
        Ok(true)
    }
}
