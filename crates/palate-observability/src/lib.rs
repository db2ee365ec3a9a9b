//! # palate-observability
//!
//! Tracing subscriber setup, the `palate.*` span macros, structured events,
//! and counters for retrain runs.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::RetrainMetrics;
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
