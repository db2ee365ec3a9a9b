/// Classifier and model-registry errors.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model artifact could not be decoded: {reason}")]
    CorruptArtifact { reason: String },

    #[error("model registry lock poisoned: {reason}")]
    LockPoisoned { reason: String },
}
