//! # palate-recommend
//!
//! Everything a front end calls. A [`SessionContext`] carries one user's
//! identity and setup progress between actions; [`RecommendationService`]
//! performs the actions against the store, the retrainer and the model
//! registry.

mod selector;
mod service;
mod session;

pub use selector::{select_query_keywords, Recommendation};
pub use service::{RecommendationService, SearchSubmission};
pub use session::{SessionContext, SetupStage};
