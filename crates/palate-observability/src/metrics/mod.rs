//! Counters for the retrain pipeline.

pub mod retrain_metrics;

pub use retrain_metrics::RetrainMetrics;
