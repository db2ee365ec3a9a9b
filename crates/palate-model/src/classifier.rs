use palate_core::errors::PalateResult;
use palate_features::FeatureVector;

/// A binary classifier over encoded feature vectors.
///
/// Labels are `0` (dislike) and `1` (like).
pub trait Classifier: Send + Sync {
    /// Fit from scratch, discarding any previous state.
    ///
    /// Fails with `InsufficientData` on an empty set and `InvalidInput` when
    /// `x` and `y` differ in length or a label is not 0/1.
    fn fit(&mut self, x: &[FeatureVector], y: &[u8]) -> PalateResult<()>;

    /// Predict one label. Fails with `ModelNotLoaded` before a successful fit.
    fn predict(&self, x: &FeatureVector) -> PalateResult<u8>;

    fn is_fitted(&self) -> bool;
}

/// Shared argument checks for [`Classifier::fit`].
pub(crate) fn validate_training_set(x: &[FeatureVector], y: &[u8]) -> PalateResult<()> {
    use palate_core::errors::PalateError;

    if x.is_empty() {
        return Err(PalateError::InsufficientData { rows: 0 });
    }
    if x.len() != y.len() {
        return Err(PalateError::invalid(
            "training_set",
            format!("{} feature rows but {} labels", x.len(), y.len()),
        ));
    }
    if let Some((row, label)) = y.iter().enumerate().find(|(_, &l)| l > 1) {
        return Err(PalateError::invalid(
            "label",
            format!("row {row} has label {label}, expected 0 or 1"),
        ));
    }
    Ok(())
}
