//! Structured log events for the retrain cycle.

/// A fresh model was fitted, persisted and installed.
pub fn model_trained(rows: usize, skipped: usize, n_trees: usize) {
    tracing::info!(
        event = "model_trained",
        rows = rows,
        skipped = skipped,
        n_trees = n_trees,
        "model trained"
    );
}

/// Extraction produced no rows; the previous model stays.
pub fn training_skipped(skipped: usize) {
    tracing::info!(
        event = "training_skipped",
        skipped = skipped,
        "no training rows, keeping previous model"
    );
}

/// A retrain request was dropped by the throttle policy.
pub fn retrain_throttled(reason: &str) {
    tracing::debug!(event = "retrain_throttled", reason = %reason, "retrain throttled");
}

/// A retrain failed; the previous model stays.
pub fn retrain_failed(error: &str) {
    tracing::warn!(event = "retrain_failed", error = %error, "retrain failed, keeping previous model");
}

/// Prediction could not be made; the caller falls back to no keywords.
pub fn recommendation_degraded(user_id: i64, error: &str) {
    tracing::warn!(
        event = "recommendation_degraded",
        user_id = user_id,
        error = %error,
        "recommendation unavailable"
    );
}
