//! Error handling for Palate.
//! One error enum per subsystem, `thiserror` only, aggregated in [`PalateError`].

pub mod config_error;
pub mod model_error;
pub mod palate_error;
pub mod recommendation_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use model_error::ModelError;
pub use palate_error::{PalateError, PalateResult};
pub use recommendation_error::RecommendationError;
pub use storage_error::StorageError;
