use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MIN_SAMPLES_SPLIT, DEFAULT_RANDOM_SEED, DEFAULT_TREE_COUNT};

/// Random forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub n_trees: usize,
    /// `None` grows trees until leaves are pure.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_TREE_COUNT,
            max_depth: None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            seed: DEFAULT_RANDOM_SEED,
        }
    }
}
