use super::PalateError;

/// Failure anywhere in the fetch → predict → select chain.
///
/// Callers render this as a non-fatal warning with an empty result set.
#[derive(Debug, thiserror::Error)]
#[error("recommendation failed: {source}")]
pub struct RecommendationError {
    #[source]
    pub source: Box<PalateError>,
}

impl RecommendationError {
    /// True when the chain failed only because no model exists yet.
    pub fn is_model_missing(&self) -> bool {
        matches!(*self.source, PalateError::ModelNotLoaded)
    }
}

impl From<PalateError> for RecommendationError {
    fn from(source: PalateError) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}
