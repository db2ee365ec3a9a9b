use std::fmt;

/// Result of one retrain trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrainOutcome {
    /// A new model was fitted, persisted and installed.
    Trained { rows: usize, skipped: usize },
    /// Extraction produced no rows; nothing was replaced.
    InsufficientData { skipped: usize },
    /// The throttle policy declined this trigger.
    Throttled,
}

impl RetrainOutcome {
    pub fn is_trained(&self) -> bool {
        matches!(self, RetrainOutcome::Trained { .. })
    }

    /// Interactions left out of the training set; 0 when throttled.
    pub fn skipped(&self) -> usize {
        match self {
            RetrainOutcome::Trained { skipped, .. }
            | RetrainOutcome::InsufficientData { skipped } => *skipped,
            RetrainOutcome::Throttled => 0,
        }
    }
}

impl fmt::Display for RetrainOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrainOutcome::Trained { rows, skipped } => {
                write!(f, "trained on {rows} rows ({skipped} interactions skipped)")
            }
            RetrainOutcome::InsufficientData { skipped } => {
                write!(f, "no usable training data ({skipped} interactions skipped)")
            }
            RetrainOutcome::Throttled => f.write_str("throttled"),
        }
    }
}
