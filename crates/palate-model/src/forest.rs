use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use palate_core::config::ModelConfig;
use palate_core::constants::{DEFAULT_MIN_SAMPLES_SPLIT, DEFAULT_RANDOM_SEED, DEFAULT_TREE_COUNT};
use palate_core::errors::{PalateError, PalateResult};
use palate_features::FeatureVector;

use crate::classifier::{validate_training_set, Classifier};
use crate::tree::{majority, DecisionTree, TreeParams};

/// Hyperparameters for [`RandomForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_TREE_COUNT,
            max_depth: None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            seed: DEFAULT_RANDOM_SEED,
        }
    }
}

impl From<&ModelConfig> for ForestParams {
    fn from(config: &ModelConfig) -> Self {
        Self {
            n_trees: config.n_trees,
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            seed: config.seed,
        }
    }
}

/// Features tried at each split: `floor(sqrt(WIDTH))`.
fn max_features() -> usize {
    (FeatureVector::WIDTH as f64).sqrt().floor() as usize
}

/// Bagged ensemble of Gini trees with per-split feature subsampling.
///
/// Tree `i` draws its bootstrap sample and feature subsets from a `StdRng`
/// seeded with `seed + i`, so two fits with equal params and data produce
/// identical forests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.params.n_trees = n_trees;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.params.max_depth = Some(depth);
        self
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Number of trees voting for class 1.
    pub fn votes(&self, x: &FeatureVector) -> PalateResult<usize> {
        if self.trees.is_empty() {
            return Err(PalateError::ModelNotLoaded);
        }
        Ok(self.trees.iter().filter(|t| t.classify(x) == 1).count())
    }

    /// Decoded-artifact check: every tree must be structurally sound.
    pub(crate) fn check_integrity(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check_integrity().map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(ForestParams::default())
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, x: &[FeatureVector], y: &[u8]) -> PalateResult<()> {
        validate_training_set(x, y)?;
        if self.params.n_trees == 0 {
            return Err(PalateError::invalid("n_trees", "must be greater than 0"));
        }

        let n = x.len();
        let tree_params = TreeParams {
            max_depth: self.params.max_depth,
            min_samples_split: self.params.min_samples_split.max(2),
            max_features: max_features(),
        };
        let dist = Uniform::from(0..n);

        let trees = (0..self.params.n_trees)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(self.params.seed.wrapping_add(i as u64));
                let sample: Vec<usize> = (0..n).map(|_| dist.sample(&mut rng)).collect();
                DecisionTree::grow(x, y, &sample, tree_params, &mut rng)
            })
            .collect();
        self.trees = trees;

        tracing::debug!(
            rows = n,
            n_trees = self.params.n_trees,
            seed = self.params.seed,
            "fitted random forest"
        );
        Ok(())
    }

    /// Majority vote; a tie goes to 0.
    fn predict(&self, x: &FeatureVector) -> PalateResult<u8> {
        let ones = self.votes(x)?;
        Ok(majority(self.trees.len() - ones, ones))
    }

    fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}
