use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregated retrain outcomes since process start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrainMetrics {
    pub total_runs: u64,
    pub trained: u64,
    pub insufficient_data: u64,
    pub throttled: u64,
    pub failures: u64,
    /// Interactions dropped during extraction, summed over all runs.
    pub skipped_rows: u64,
    pub last_trained_rows: Option<usize>,
    pub last_trained_at: Option<DateTime<Utc>>,
}

impl RetrainMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_trained(&mut self, rows: usize, skipped: usize, at: DateTime<Utc>) {
        self.total_runs += 1;
        self.trained += 1;
        self.skipped_rows += skipped as u64;
        self.last_trained_rows = Some(rows);
        self.last_trained_at = Some(at);
    }

    pub fn record_insufficient(&mut self, skipped: usize) {
        self.total_runs += 1;
        self.insufficient_data += 1;
        self.skipped_rows += skipped as u64;
    }

    pub fn record_throttled(&mut self) {
        self.total_runs += 1;
        self.throttled += 1;
    }

    pub fn record_failure(&mut self) {
        self.total_runs += 1;
        self.failures += 1;
    }

    /// Share of runs that produced a new model.
    pub fn success_rate(&self) -> f64 {
        if self.total_runs == 0 {
            return 0.0;
        }
        self.trained as f64 / self.total_runs as f64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
