//! # palate-features
//!
//! Deterministic mapping from a user's bias state and one search into a
//! 22-wide numeric vector.
//!
//! ## Layout
//!
//! | Offset | Width | Content |
//! |--------|-------|---------|
//! | 0 | 1 | temperature bias |
//! | 1 | 1 | tourist bias |
//! | 2 | 1 | emotion (sad=0, neutral=1, happy=2) |
//! | 3 | 8 | cuisine flags |
//! | 11 | 6 | taste flags |
//! | 17 | 3 | diet flags `[Vegan, Vegetarian, None]` |
//! | 20 | 2 | price min, price max |
//!
//! Training-data extraction and single-instance prediction both go through
//! [`encode`]; there is no second encoding path.

mod encoder;
mod vector;

pub use encoder::{encode, feature_names};
pub use vector::FeatureVector;
