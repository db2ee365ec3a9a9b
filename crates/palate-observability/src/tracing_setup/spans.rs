//! Span definitions per operation: retrain, predict, encode.

/// Create a retrain span.
#[macro_export]
macro_rules! retrain_span {
    ($trigger:expr) => {
        tracing::info_span!("palate.retrain", trigger = %$trigger)
    };
}

/// Create a predict span.
#[macro_export]
macro_rules! predict_span {
    ($user_id:expr) => {
        tracing::debug_span!("palate.predict", user_id = $user_id)
    };
}

/// Create an encode span.
#[macro_export]
macro_rules! encode_span {
    ($rows:expr) => {
        tracing::debug_span!("palate.encode", rows = $rows)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRAIN: &str = "palate.retrain";
    pub const PREDICT: &str = "palate.predict";
    pub const ENCODE: &str = "palate.encode";
}
