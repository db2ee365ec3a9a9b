//! StorageEngine: owns the ConnectionPool, implements IPreferenceStorage +
//! IModelStorage, runs migrations at open.

use std::path::Path;

use chrono::{DateTime, Utc};

use palate_core::config::StorageConfig;
use palate_core::errors::{PalateError, PalateResult};
use palate_core::models::{
    Emotion, Feedback, Interaction, InteractionId, SearchId, SearchQuery, SearchRecord,
    StoredModel, SurveyAnswers, UserBiasState, UserId, UserInfo,
};
use palate_core::traits::{IModelStorage, IPreferenceStorage};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{interaction_ops, model_ops, search_ops, user_ops};

/// The main storage engine.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> PalateResult<Self> {
        Self::open_with_pool_size(path, palate_core::constants::DEFAULT_READ_POOL_SIZE)
    }

    pub fn open_with_pool_size(path: &Path, read_pool_size: usize) -> PalateResult<Self> {
        // The writer must create the file and schema before read-only
        // connections can attach to it.
        let writer = crate::pool::WriteConnection::open(path)?;
        writer.with_conn(|conn| migrations::run_migrations(conn).map(|_| ()))?;
        drop(writer);

        let pool = ConnectionPool::open(path, read_pool_size)?;
        tracing::info!(path = %path.display(), read_pool_size, "opened storage engine");
        Ok(Self { pool })
    }

    pub fn open_from_config(config: &StorageConfig) -> PalateResult<Self> {
        Self::open_with_pool_size(&config.db_path, config.read_pool_size)
    }

    /// Open an in-memory storage engine (for testing).
    /// All reads go through the writer.
    pub fn open_in_memory() -> PalateResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        pool.writer
            .with_conn(|conn| migrations::run_migrations(conn).map(|_| ()))?;
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    /// File-backed: uses the read pool (no writer contention).
    /// In-memory: uses the writer.
    fn with_reader<F, T>(&self, f: F) -> PalateResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> PalateResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }

    /// Insert a search with an explicit timestamp (imports, backfills, tests).
    pub fn save_search_query_at(
        &self,
        user_id: UserId,
        query: &SearchQuery,
        timestamp: DateTime<Utc>,
    ) -> PalateResult<SearchId> {
        self.pool
            .writer
            .with_conn(|conn| search_ops::insert_search(conn, user_id, query, timestamp))
    }

    /// Record an interaction with an explicit timestamp (imports, backfills, tests).
    pub fn record_interaction_at(
        &self,
        user_id: UserId,
        cuisine: &str,
        feedback: Feedback,
        timestamp: DateTime<Utc>,
    ) -> PalateResult<InteractionId> {
        self.pool.writer.with_conn(|conn| {
            interaction_ops::insert_interaction(conn, user_id, cuisine, feedback, timestamp)
        })
    }

    /// Applied schema version.
    pub fn schema_version(&self) -> PalateResult<u32> {
        self.with_reader(migrations::current_version)
    }
}

impl IPreferenceStorage for StorageEngine {
    fn get_or_create_user(&self, username: &str) -> PalateResult<(UserInfo, bool)> {
        self.pool
            .writer
            .with_conn(|conn| user_ops::get_or_create_user(conn, username))
    }

    fn get_user(&self, user_id: UserId) -> PalateResult<Option<UserInfo>> {
        self.with_reader(|conn| user_ops::get_user(conn, user_id))
    }

    fn get_user_data(&self, user_id: UserId) -> PalateResult<UserBiasState> {
        self.with_reader(|conn| user_ops::get_user_data(conn, user_id))
    }

    fn list_users(&self) -> PalateResult<Vec<UserInfo>> {
        self.with_reader(user_ops::list_users)
    }

    fn save_user_setup(&self, user_id: UserId, emotion: Emotion) -> PalateResult<()> {
        self.pool
            .writer
            .with_conn(|conn| user_ops::update_emotion(conn, user_id, emotion))
    }

    fn save_user_preferences(
        &self,
        user_id: UserId,
        answers: &SurveyAnswers,
    ) -> PalateResult<UserBiasState> {
        self.pool
            .writer
            .with_conn(|conn| user_ops::update_preferences(conn, user_id, answers))
    }

    fn save_search_query(&self, user_id: UserId, query: &SearchQuery) -> PalateResult<SearchId> {
        self.save_search_query_at(user_id, query, Utc::now())
    }

    fn get_recent_search(&self, user_id: UserId) -> PalateResult<SearchRecord> {
        self.with_reader(|conn| search_ops::get_recent_search(conn, user_id))?
            .ok_or_else(|| PalateError::missing_search(user_id))
    }

    fn list_searches_for_user(&self, user_id: UserId) -> PalateResult<Vec<SearchRecord>> {
        self.with_reader(|conn| search_ops::list_for_user(conn, user_id))
    }

    fn list_searches(&self) -> PalateResult<Vec<SearchRecord>> {
        self.with_reader(search_ops::list_all)
    }

    fn record_interaction(
        &self,
        user_id: UserId,
        cuisine: &str,
        feedback: Feedback,
    ) -> PalateResult<InteractionId> {
        self.record_interaction_at(user_id, cuisine, feedback, Utc::now())
    }

    fn list_interactions(&self) -> PalateResult<Vec<Interaction>> {
        self.with_reader(interaction_ops::list_all)
    }

    fn count_interactions(&self) -> PalateResult<usize> {
        self.with_reader(interaction_ops::count)
    }
}

impl IModelStorage for StorageEngine {
    fn load_model(&self) -> PalateResult<Option<StoredModel>> {
        self.with_reader(model_ops::load_model)
    }

    fn save_model(&self, model: &StoredModel) -> PalateResult<()> {
        self.pool
            .writer
            .with_conn(|conn| model_ops::save_model(conn, model))?;
        tracing::debug!(trained_rows = model.trained_rows, bytes = model.payload.len(), "saved model artifact");
        Ok(())
    }
}
