//! Full re-extraction and fresh fit, with throttling and metrics.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use palate_core::config::{JoinStrategy, PalateConfig};
use palate_core::errors::{PalateError, PalateResult};
use palate_core::traits::{IModelStorage, IPreferenceStorage};
use palate_model::{Classifier, ForestParams, ModelRegistry, RandomForest};
use palate_observability::tracing_setup::events;
use palate_observability::RetrainMetrics;

use crate::extract::extract_training_set;
use crate::scheduling::{ThrottleDecision, ThrottlePolicy, ThrottleState};
use crate::RetrainOutcome;

/// Extract, fit, persist, then install.
///
/// The registry is only touched after the artifact is saved, so a failed
/// save leaves the previous model serving. An empty extraction returns
/// [`RetrainOutcome::InsufficientData`] without touching either. Never
/// returns [`RetrainOutcome::Throttled`]; throttling belongs to [`Retrainer`].
pub fn retrain<S>(
    store: &S,
    registry: &ModelRegistry,
    params: ForestParams,
    strategy: JoinStrategy,
) -> PalateResult<RetrainOutcome>
where
    S: IPreferenceStorage + IModelStorage + ?Sized,
{
    let set = extract_training_set(store, strategy)?;
    if set.is_empty() {
        events::training_skipped(set.skipped);
        return Ok(RetrainOutcome::InsufficientData {
            skipped: set.skipped,
        });
    }

    let mut forest = RandomForest::new(params);
    forest.fit(&set.rows, &set.labels)?;

    let artifact = forest.to_stored(set.len())?;
    store.save_model(&artifact)?;
    registry.install(Arc::new(forest))?;

    events::model_trained(set.len(), set.skipped, params.n_trees);
    Ok(RetrainOutcome::Trained {
        rows: set.len(),
        skipped: set.skipped,
    })
}

/// Owns everything a retrain needs and serializes concurrent triggers.
pub struct Retrainer<S: ?Sized> {
    store: Arc<S>,
    registry: Arc<ModelRegistry>,
    params: ForestParams,
    strategy: JoinStrategy,
    policy: ThrottlePolicy,
    /// Held for the whole retrain; doubles as the single-execution guard.
    state: Mutex<ThrottleState>,
    metrics: Mutex<RetrainMetrics>,
}

impl<S> Retrainer<S>
where
    S: IPreferenceStorage + IModelStorage + ?Sized,
{
    pub fn new(
        store: Arc<S>,
        registry: Arc<ModelRegistry>,
        params: ForestParams,
        strategy: JoinStrategy,
    ) -> Self {
        Self {
            store,
            registry,
            params,
            strategy,
            policy: ThrottlePolicy::default(),
            state: Mutex::new(ThrottleState::default()),
            metrics: Mutex::new(RetrainMetrics::default()),
        }
    }

    pub fn from_config(store: Arc<S>, registry: Arc<ModelRegistry>, config: &PalateConfig) -> Self {
        Self::new(
            store,
            registry,
            ForestParams::from(&config.model),
            config.retrain.join_strategy,
        )
        .with_throttle(ThrottlePolicy::from(&config.retrain))
    }

    pub fn with_throttle(mut self, policy: ThrottlePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub fn strategy(&self) -> JoinStrategy {
        self.strategy
    }

    pub fn metrics(&self) -> RetrainMetrics {
        match self.metrics.lock() {
            Ok(m) => m.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Retrain unless the throttle policy says otherwise.
    pub fn retrain(&self) -> PalateResult<RetrainOutcome> {
        self.run("trigger", true)
    }

    /// Retrain regardless of the throttle policy.
    pub fn retrain_now(&self) -> PalateResult<RetrainOutcome> {
        self.run("manual", false)
    }

    fn run(&self, trigger: &str, throttled: bool) -> PalateResult<RetrainOutcome> {
        let span = palate_observability::retrain_span!(trigger);
        let _guard = span.enter();

        let mut state = self.lock_state()?;
        let now = Utc::now();

        if throttled && !self.policy.is_disabled() {
            let count = self.store.count_interactions()?;
            if let ThrottleDecision::Skip { reason } = self.policy.evaluate(&state, now, count) {
                events::retrain_throttled(&reason);
                self.with_metrics(|m| m.record_throttled());
                return Ok(RetrainOutcome::Throttled);
            }
        }

        match retrain(self.store.as_ref(), &self.registry, self.params, self.strategy) {
            Ok(outcome) => {
                if let RetrainOutcome::Trained { rows, skipped } = outcome {
                    state.record_trained(now, rows + skipped);
                    self.with_metrics(|m| m.record_trained(rows, skipped, now));
                } else {
                    self.with_metrics(|m| m.record_insufficient(outcome.skipped()));
                }
                Ok(outcome)
            }
            Err(e) => {
                events::retrain_failed(&e.to_string());
                self.with_metrics(|m| m.record_failure());
                Err(e)
            }
        }
    }

    fn lock_state(&self) -> PalateResult<MutexGuard<'_, ThrottleState>> {
        self.state
            .lock()
            .map_err(|e| PalateError::Worker(format!("retrain state lock poisoned: {e}")))
    }

    fn with_metrics(&self, f: impl FnOnce(&mut RetrainMetrics)) {
        match self.metrics.lock() {
            Ok(mut m) => f(&mut m),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}
