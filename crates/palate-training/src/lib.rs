//! # palate-training
//!
//! Rebuilds the classifier from everything in the store.
//!
//! [`extract_training_set`] joins each interaction to its user and one of
//! that user's searches and encodes the pair. [`retrain`] fits a fresh
//! forest on the result, persists it, and swaps it into the
//! [`ModelRegistry`](palate_model::ModelRegistry). [`Retrainer`] adds the
//! throttle policy and metrics; [`RetrainWorker`] moves it off the request
//! path.

mod extract;
mod outcome;
mod retrainer;
pub mod scheduling;
mod worker;

pub use extract::{extract_training_set, select_search, TrainingSet};
pub use outcome::RetrainOutcome;
pub use retrainer::{retrain, Retrainer};
pub use worker::RetrainWorker;
