use std::ops::Index;

use serde::{Deserialize, Serialize};

use palate_core::constants::FEATURE_WIDTH;

/// One encoded sample. Width is fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_WIDTH]);

impl FeatureVector {
    pub const WIDTH: usize = FEATURE_WIDTH;

    pub fn from_array(values: [f64; FEATURE_WIDTH]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_array(self) -> [f64; FEATURE_WIDTH] {
        self.0
    }

    /// Bit-level equality; distinguishes `0.0` from `-0.0`.
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<FeatureVector> for Vec<f64> {
    fn from(v: FeatureVector) -> Self {
        v.0.to_vec()
    }
}
