use crate::errors::PalateResult;
use crate::models::{
    Emotion, Feedback, Interaction, InteractionId, SearchId, SearchQuery, SearchRecord,
    StoredModel, SurveyAnswers, UserBiasState, UserId, UserInfo,
};

/// Users, searches and interactions: everything the pipeline reads and writes.
pub trait IPreferenceStorage: Send + Sync {
    // --- Users ---
    /// Returns the user and whether it was created by this call.
    fn get_or_create_user(&self, username: &str) -> PalateResult<(UserInfo, bool)>;
    fn get_user(&self, user_id: UserId) -> PalateResult<Option<UserInfo>>;
    /// Fails with `MissingUserData` when the user does not exist.
    fn get_user_data(&self, user_id: UserId) -> PalateResult<UserBiasState>;
    fn list_users(&self) -> PalateResult<Vec<UserInfo>>;
    /// Records the selected mood.
    fn save_user_setup(&self, user_id: UserId, emotion: Emotion) -> PalateResult<()>;
    /// Stores the survey blob and the biases derived from it.
    fn save_user_preferences(
        &self,
        user_id: UserId,
        answers: &SurveyAnswers,
    ) -> PalateResult<UserBiasState>;

    // --- Searches ---
    fn save_search_query(&self, user_id: UserId, query: &SearchQuery) -> PalateResult<SearchId>;
    /// Fails with `MissingUserData` when the user has no search.
    fn get_recent_search(&self, user_id: UserId) -> PalateResult<SearchRecord>;
    /// Oldest first.
    fn list_searches_for_user(&self, user_id: UserId) -> PalateResult<Vec<SearchRecord>>;
    /// Every search, grouped by user, oldest first within a user.
    fn list_searches(&self) -> PalateResult<Vec<SearchRecord>>;

    // --- Interactions ---
    fn record_interaction(
        &self,
        user_id: UserId,
        cuisine: &str,
        feedback: Feedback,
    ) -> PalateResult<InteractionId>;
    /// Every interaction in insertion order.
    fn list_interactions(&self) -> PalateResult<Vec<Interaction>>;
    fn count_interactions(&self) -> PalateResult<usize>;
}

/// Durable slot for the single global classifier.
pub trait IModelStorage: Send + Sync {
    fn load_model(&self) -> PalateResult<Option<StoredModel>>;
    /// Replaces any previously saved model.
    fn save_model(&self, model: &StoredModel) -> PalateResult<()>;
}
