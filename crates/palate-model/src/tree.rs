//! Gini decision tree, stored as a flat node arena.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use palate_core::constants::DEFAULT_RANDOM_SEED;
use palate_core::errors::{PalateError, PalateResult};
use palate_features::FeatureVector;

use crate::classifier::{validate_training_set, Classifier};

/// One arena slot. Children are indices into [`DecisionTree::nodes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum Node {
    Leaf {
        class: u8,
        n_samples: usize,
    },
    Split {
        feature: usize,
        /// Samples with `x[feature] <= threshold` go left.
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Features considered per split. `FeatureVector::WIDTH` disables bagging.
    pub max_features: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            max_features: FeatureVector::WIDTH,
        }
    }
}

/// A single CART-style classification tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub(crate) nodes: Vec<Node>,
    #[serde(skip)]
    params: TreeParams,
}

impl DecisionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.params.max_depth = Some(depth);
        self
    }

    /// Depth of the fitted tree; a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match &nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Grow a tree over `sample` (row indices into `x`, repeats allowed).
    pub(crate) fn grow<R: Rng>(
        x: &[FeatureVector],
        y: &[u8],
        sample: &[usize],
        params: TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut builder = Builder {
            x,
            y,
            params,
            rng,
            nodes: Vec::new(),
        };
        builder.build(sample.to_vec(), 0);
        Self {
            nodes: builder.nodes,
            params,
        }
    }

    /// Walk from the root to a leaf. Caller guarantees the tree is non-empty.
    pub(crate) fn classify(&self, x: &FeatureVector) -> u8 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { class, .. } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Structural check run after decoding a persisted tree.
    pub(crate) fn check_integrity(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("empty tree".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Leaf { class, .. } if *class > 1 => {
                    return Err(format!("node {i}: leaf class {class}"));
                }
                Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= FeatureVector::WIDTH {
                        return Err(format!("node {i}: feature index {feature}"));
                    }
                    // Children are always pushed after their parent.
                    if *left <= i || *right <= i || *left >= self.nodes.len() || *right >= self.nodes.len() {
                        return Err(format!("node {i}: child index out of range"));
                    }
                }
                Node::Leaf { .. } => {}
            }
        }
        Ok(())
    }
}

impl Classifier for DecisionTree {
    fn fit(&mut self, x: &[FeatureVector], y: &[u8]) -> PalateResult<()> {
        validate_training_set(x, y)?;
        let sample: Vec<usize> = (0..x.len()).collect();
        let mut rng = StdRng::seed_from_u64(DEFAULT_RANDOM_SEED);
        *self = Self::grow(x, y, &sample, self.params, &mut rng);
        Ok(())
    }

    fn predict(&self, x: &FeatureVector) -> PalateResult<u8> {
        if self.nodes.is_empty() {
            return Err(PalateError::ModelNotLoaded);
        }
        Ok(self.classify(x))
    }

    fn is_fitted(&self) -> bool {
        !self.nodes.is_empty()
    }
}

struct Builder<'a, R> {
    x: &'a [FeatureVector],
    y: &'a [u8],
    params: TreeParams,
    rng: &'a mut R,
    nodes: Vec<Node>,
}

impl<R: Rng> Builder<'_, R> {
    /// Push the subtree for `rows` and return its root index.
    fn build(&mut self, rows: Vec<usize>, depth: usize) -> usize {
        let (n0, n1) = count_labels(self.y, &rows);
        let n = rows.len();

        let stop = n0 == 0
            || n1 == 0
            || n < self.params.min_samples_split
            || self.params.max_depth.is_some_and(|d| depth >= d);
        if stop {
            return self.push_leaf(n0, n1);
        }

        let Some((feature, threshold)) = self.best_split(&rows, n0, n1) else {
            return self.push_leaf(n0, n1);
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&r| self.x[r][feature] <= threshold);
        if left_rows.is_empty() || right_rows.is_empty() {
            return self.push_leaf(n0, n1);
        }

        let idx = self.nodes.len();
        // Placeholder, patched once both children exist.
        self.nodes.push(Node::Leaf {
            class: 0,
            n_samples: n,
        });
        let left = self.build(left_rows, depth + 1);
        let right = self.build(right_rows, depth + 1);
        self.nodes[idx] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        idx
    }

    fn push_leaf(&mut self, n0: usize, n1: usize) -> usize {
        self.nodes.push(Node::Leaf {
            class: majority(n0, n1),
            n_samples: n0 + n1,
        });
        self.nodes.len() - 1
    }

    /// Highest Gini gain over a random feature subset, thresholds at
    /// midpoints between consecutive distinct values.
    ///
    /// Features are visited in a shuffled order. After `max_features` have
    /// been inspected the search stops at the first improvement; until then
    /// it keeps going, so a node is only a leaf when no feature separates it.
    fn best_split(&mut self, rows: &[usize], n0: usize, n1: usize) -> Option<(usize, f64)> {
        let width = FeatureVector::WIDTH;
        let k = self.params.max_features.clamp(1, width);
        let mut features: Vec<usize> = (0..width).collect();
        if k < width {
            features.shuffle(&mut *self.rng);
        }

        let parent = gini(n0, n1);
        let n = rows.len() as f64;
        let mut best: Option<(usize, f64)> = None;
        let mut best_gain = 0.0;

        let mut column: Vec<(f64, u8)> = Vec::with_capacity(rows.len());
        for (visited, feature) in features.into_iter().enumerate() {
            if visited >= k && best.is_some() {
                break;
            }
            column.clear();
            column.extend(rows.iter().map(|&r| (self.x[r][feature], self.y[r])));
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            let (mut l0, mut l1) = (0usize, 0usize);
            for i in 0..column.len() - 1 {
                if column[i].1 == 0 {
                    l0 += 1;
                } else {
                    l1 += 1;
                }
                let (here, next) = (column[i].0, column[i + 1].0);
                // Also rejects -0.0/0.0 and NaN neighbours, which `<=` cannot separate.
                if here.partial_cmp(&next) != Some(Ordering::Less) {
                    continue;
                }
                let (r0, r1) = (n0 - l0, n1 - l1);
                let nl = (l0 + l1) as f64;
                let nr = (r0 + r1) as f64;
                let weighted = (nl / n) * gini(l0, l1) + (nr / n) * gini(r0, r1);
                let gain = parent - weighted;
                if gain > best_gain {
                    best_gain = gain;
                    best = Some((feature, split_threshold(here, next)));
                }
            }
        }
        best
    }
}

/// Midpoint of `here < next`, or `here` when the midpoint rounds up to
/// `next` (adjacent floats) and would send every row left.
fn split_threshold(here: f64, next: f64) -> f64 {
    let mid = here + (next - here) / 2.0;
    if mid < next {
        mid
    } else {
        here
    }
}

fn count_labels(y: &[u8], rows: &[usize]) -> (usize, usize) {
    let ones = rows.iter().filter(|&&r| y[r] == 1).count();
    (rows.len() - ones, ones)
}

/// Gini impurity `1 - Σ p_i²` for two classes.
fn gini(n0: usize, n1: usize) -> f64 {
    let n = (n0 + n1) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let p0 = n0 as f64 / n;
    let p1 = n1 as f64 / n;
    1.0 - p0 * p0 - p1 * p1
}

/// Ties go to class 0.
pub(crate) fn majority(n0: usize, n1: usize) -> u8 {
    u8::from(n1 > n0)
}
