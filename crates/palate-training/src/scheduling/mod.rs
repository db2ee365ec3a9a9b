//! Retrain scheduling: throttle policy and the state it evaluates.

pub mod throttle;

pub use throttle::{ThrottleDecision, ThrottlePolicy, ThrottleState};
