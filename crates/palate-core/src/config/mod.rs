//! Configuration system for Palate.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod model_config;
pub mod palate_config;
pub mod retrain_config;
pub mod storage_config;

pub use model_config::ModelConfig;
pub use palate_config::PalateConfig;
pub use retrain_config::{JoinStrategy, RetrainConfig};
pub use storage_config::StorageConfig;
