//! # palate-core
//!
//! Foundation crate for the Palate recommendation pipeline.
//! Defines the data model, the feature-schema constants, the error taxonomy,
//! configuration, and the storage traits. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PalateConfig;
pub use errors::{PalateError, PalateResult, RecommendationError};
pub use models::{
    Diet, Emotion, Feedback, Interaction, PriceRange, SearchQuery, SearchRecord, StoredModel,
    SurveyAnswers, UserBiasState, UserId, UserInfo,
};
