//! Skip retrains that would run too soon or on too little new feedback.

use chrono::{DateTime, Duration, Utc};

use palate_core::config::RetrainConfig;

/// Upper bound that still fits a millisecond `Duration`.
const MAX_INTERVAL_SECS: u64 = (i64::MAX / 1_000) as u64;

/// Limits applied before each retrain. All-zero never throttles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottlePolicy {
    pub min_interval: Duration,
    pub min_new_interactions: usize,
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            min_interval: Duration::zero(),
            min_new_interactions: 0,
        }
    }
}

impl From<&RetrainConfig> for ThrottlePolicy {
    fn from(config: &RetrainConfig) -> Self {
        Self {
            min_interval: Duration::seconds(config.min_interval_secs.min(MAX_INTERVAL_SECS) as i64),
            min_new_interactions: config.min_new_interactions,
        }
    }
}

/// What the last successful retrain looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThrottleState {
    pub last_trained_at: Option<DateTime<Utc>>,
    pub interactions_at_last_train: usize,
}

impl ThrottleState {
    pub fn record_trained(&mut self, at: DateTime<Utc>, interaction_count: usize) {
        self.last_trained_at = Some(at);
        self.interactions_at_last_train = interaction_count;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThrottleDecision {
    Run,
    Skip { reason: String },
}

impl ThrottlePolicy {
    pub fn is_disabled(&self) -> bool {
        self.min_interval <= Duration::zero() && self.min_new_interactions == 0
    }

    /// Decide whether to retrain now. Never throttles before the first retrain.
    pub fn evaluate(
        &self,
        state: &ThrottleState,
        now: DateTime<Utc>,
        interaction_count: usize,
    ) -> ThrottleDecision {
        let Some(last) = state.last_trained_at else {
            return ThrottleDecision::Run;
        };

        let elapsed = now - last;
        if elapsed < self.min_interval {
            return ThrottleDecision::Skip {
                reason: format!(
                    "{}s since last retrain, minimum {}s",
                    elapsed.num_seconds(),
                    self.min_interval.num_seconds()
                ),
            };
        }

        let new_interactions = interaction_count.saturating_sub(state.interactions_at_last_train);
        if new_interactions < self.min_new_interactions {
            return ThrottleDecision::Skip {
                reason: format!(
                    "{new_interactions} new interactions, minimum {}",
                    self.min_new_interactions
                ),
            };
        }

        ThrottleDecision::Run
    }
}
