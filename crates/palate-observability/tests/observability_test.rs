use std::sync::Mutex;

use chrono::Utc;
use palate_observability::tracing_setup::{events, spans::names, LOG_ENV};
use palate_observability::{init_tracing, RetrainMetrics};

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

// ── Tracing setup ────────────────────────────────────────────────────────

#[test]
fn init_tracing_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    events::retrain_throttled("test");
}

#[test]
fn invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV, "===not a filter===");
    init_tracing();
    std::env::remove_var(LOG_ENV);
}

#[test]
fn span_macros_carry_expected_names() {
    let retrain = palate_observability::retrain_span!("test");
    let predict = palate_observability::predict_span!(7_i64);
    let encode = palate_observability::encode_span!(3_usize);
    for (span, name) in [
        (retrain, names::RETRAIN),
        (predict, names::PREDICT),
        (encode, names::ENCODE),
    ] {
        if let Some(meta) = span.metadata() {
            assert_eq!(meta.name(), name);
        }
    }
}

// ── Metrics ──────────────────────────────────────────────────────────────

#[test]
fn metrics_count_each_outcome() {
    let mut m = RetrainMetrics::new();
    let now = Utc::now();
    m.record_trained(10, 2, now);
    m.record_insufficient(3);
    m.record_throttled();
    m.record_failure();

    assert_eq!(m.total_runs, 4);
    assert_eq!(m.trained, 1);
    assert_eq!(m.insufficient_data, 1);
    assert_eq!(m.throttled, 1);
    assert_eq!(m.failures, 1);
    assert_eq!(m.skipped_rows, 5);
    assert_eq!(m.last_trained_rows, Some(10));
    assert_eq!(m.last_trained_at, Some(now));
    assert!((m.success_rate() - 0.25).abs() < 1e-12);
}

#[test]
fn metrics_reset_and_serialize() {
    let mut m = RetrainMetrics::new();
    assert_eq!(m.success_rate(), 0.0);
    m.record_trained(1, 0, Utc::now());
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["trained"], 1);
    m.reset();
    assert_eq!(m, RetrainMetrics::default());
}
