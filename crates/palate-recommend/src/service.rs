//! RecommendationService: every user-facing action, wired to store, retrainer
//! and model registry.
//!
//! Actions are synchronous and safe to call from async handlers. Inline
//! retraining fits the forest on the calling thread, so async hosts should
//! enable the background worker.

use std::sync::Arc;

use tokio::runtime::Handle;

use palate_core::config::PalateConfig;
use palate_core::constants::cuisine_for_swipe_index;
use palate_core::errors::{PalateResult, RecommendationError};
use palate_core::models::{
    Emotion, Feedback, InteractionId, SearchId, SearchQuery, SurveyAnswers, UserBiasState,
};
use palate_core::traits::{IModelStorage, IPreferenceStorage};
use palate_features::encode;
use palate_model::ModelRegistry;
use palate_observability::tracing_setup::events;
use palate_training::{RetrainOutcome, RetrainWorker, Retrainer};

use crate::selector::{select_query_keywords, Recommendation};
use crate::session::SessionContext;

/// What `submit_search` did after persisting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSubmission {
    pub search_id: SearchId,
    /// `None` when the retrain was handed to the background worker or failed.
    pub retrain: Option<RetrainOutcome>,
}

enum RetrainMode {
    Inline,
    Background(RetrainWorker),
}

pub struct RecommendationService<S>
where
    S: IPreferenceStorage + IModelStorage + 'static,
{
    store: Arc<S>,
    registry: Arc<ModelRegistry>,
    retrainer: Arc<Retrainer<S>>,
    mode: RetrainMode,
}

impl<S> RecommendationService<S>
where
    S: IPreferenceStorage + IModelStorage + 'static,
{
    /// Service that retrains inline after every search.
    pub fn new(store: Arc<S>, config: &PalateConfig) -> Self {
        let registry = Arc::new(ModelRegistry::new());
        let retrainer = Arc::new(Retrainer::from_config(
            Arc::clone(&store),
            Arc::clone(&registry),
            config,
        ));
        Self {
            store,
            registry,
            retrainer,
            mode: RetrainMode::Inline,
        }
    }

    /// Honors `retrain.background` when a runtime is available.
    pub fn from_config(store: Arc<S>, config: &PalateConfig, runtime: Option<&Handle>) -> Self {
        let service = Self::new(store, config);
        match runtime {
            Some(handle) if config.retrain.background => service.with_background_worker(handle),
            _ => service,
        }
    }

    /// Move retraining onto a blocking task of `runtime`.
    pub fn with_background_worker(mut self, runtime: &Handle) -> Self {
        let worker = RetrainWorker::spawn(Arc::clone(&self.retrainer), runtime);
        self.mode = RetrainMode::Background(worker);
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub fn retrainer(&self) -> &Arc<Retrainer<S>> {
        &self.retrainer
    }

    pub fn is_background(&self) -> bool {
        matches!(self.mode, RetrainMode::Background(_))
    }

    /// Install the last persisted model, if there is one.
    pub fn load_model(&self) -> PalateResult<bool> {
        self.registry.load_from(self.store.as_ref())
    }

    // --- Setup flow ---

    pub fn open_session(&self, username: &str) -> PalateResult<SessionContext> {
        let (user, is_new) = self.store.get_or_create_user(username)?;
        let ctx = SessionContext::new(user, is_new);
        tracing::info!(
            session_id = %ctx.session_id,
            user_id = ctx.user_id(),
            is_new,
            "session opened"
        );
        Ok(ctx)
    }

    pub fn select_mood(&self, ctx: &mut SessionContext, emotion: Emotion) -> PalateResult<()> {
        self.store.save_user_setup(ctx.user_id(), emotion)?;
        ctx.mood = Some(emotion);
        ctx.user.emotion = emotion;
        ctx.touch();
        Ok(())
    }

    /// Record a like/dislike for the cuisine card at `cuisine_index`.
    /// Indices past the vocabulary are stored as "Unknown".
    pub fn record_swipe(
        &self,
        ctx: &mut SessionContext,
        cuisine_index: usize,
        liked: bool,
    ) -> PalateResult<InteractionId> {
        let cuisine = cuisine_for_swipe_index(cuisine_index);
        let id = self
            .store
            .record_interaction(ctx.user_id(), cuisine, Feedback::from_liked(liked))?;
        ctx.swipes_recorded += 1;
        ctx.touch();
        Ok(id)
    }

    pub fn complete_survey(
        &self,
        ctx: &mut SessionContext,
        answers: &SurveyAnswers,
    ) -> PalateResult<UserBiasState> {
        let bias = self.store.save_user_preferences(ctx.user_id(), answers)?;
        ctx.user.temperature_bias = bias.temperature_bias();
        ctx.user.tourist_bias = bias.tourist_bias();
        ctx.user.other_preferences = answers.to_preferences();
        ctx.survey_completed = true;
        ctx.touch();
        Ok(bias)
    }

    // --- Search and recommendation ---

    /// Persist the search, then retrain. A failed or queued retrain does not
    /// fail the submission.
    pub fn submit_search(
        &self,
        ctx: &mut SessionContext,
        query: &SearchQuery,
    ) -> PalateResult<SearchSubmission> {
        let search_id = self.store.save_search_query(ctx.user_id(), query)?;
        ctx.touch();

        let retrain = match &self.mode {
            RetrainMode::Inline => match self.retrainer.retrain() {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    tracing::warn!(error = %e, search_id, "retrain after search failed");
                    None
                }
            },
            RetrainMode::Background(worker) => {
                if let Err(e) = worker.request() {
                    tracing::warn!(error = %e, search_id, "could not queue background retrain");
                }
                None
            }
        };

        Ok(SearchSubmission { search_id, retrain })
    }

    /// Predict for the user's latest search and pick keywords.
    pub fn surprise_me(&self, ctx: &SessionContext) -> Result<Vec<String>, RecommendationError> {
        let user_id = ctx.user_id();
        let span = palate_observability::predict_span!(user_id);
        let _guard = span.enter();

        let bias = self.store.get_user_data(user_id)?;
        let recent = self.store.get_recent_search(user_id)?;
        let prediction = self.registry.predict(&encode(&bias, &recent))?;
        let keywords = select_query_keywords(prediction, &recent);
        tracing::debug!(prediction, keywords = ?keywords, "selected query keywords");
        Ok(keywords)
    }

    /// [`surprise_me`](Self::surprise_me) with failures turned into an empty
    /// keyword list and a warning.
    pub fn surprise_me_or_empty(&self, ctx: &SessionContext) -> Recommendation {
        match self.surprise_me(ctx) {
            Ok(keywords) => Recommendation {
                keywords,
                warning: None,
            },
            Err(e) => {
                events::recommendation_degraded(ctx.user_id(), &e.to_string());
                Recommendation {
                    keywords: Vec::new(),
                    warning: Some(e),
                }
            }
        }
    }

    /// Stop the background worker after its pending retrain, if any.
    pub async fn shutdown(self) -> PalateResult<()> {
        match self.mode {
            RetrainMode::Background(worker) => worker.shutdown().await,
            RetrainMode::Inline => Ok(()),
        }
    }
}
