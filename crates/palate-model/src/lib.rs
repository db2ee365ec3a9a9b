//! # palate-model
//!
//! Binary classifier over [`FeatureVector`]s and the registry that serves it.
//!
//! [`RandomForest`] is a bagged ensemble of Gini decision trees. Training is
//! fully determined by [`ForestParams::seed`]. [`ModelRegistry`] holds the
//! current forest behind an `Arc` so predictions never block on a retrain.
//!
//! [`FeatureVector`]: palate_features::FeatureVector

mod artifact;
mod classifier;
mod forest;
mod registry;
mod tree;

pub use classifier::Classifier;
pub use forest::{ForestParams, RandomForest};
pub use registry::ModelRegistry;
pub use tree::DecisionTree;
