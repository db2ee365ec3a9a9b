//! Interaction → (user, search) join and encoding.

use std::collections::HashMap;

use palate_core::config::JoinStrategy;
use palate_core::errors::{PalateError, PalateResult};
use palate_core::models::{Interaction, SearchRecord, UserBiasState, UserId};
use palate_core::traits::IPreferenceStorage;
use palate_features::{encode, FeatureVector};

/// Encoded rows, their labels, and how many interactions could not be joined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub rows: Vec<FeatureVector>,
    pub labels: Vec<u8>,
    pub skipped: usize,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Pick the search an interaction is attributed to.
///
/// `searches` must be ordered oldest first. Returns `None` only when the
/// user has no searches.
pub fn select_search<'a>(
    searches: &'a [SearchRecord],
    interaction: &Interaction,
    strategy: JoinStrategy,
) -> Option<&'a SearchRecord> {
    match strategy {
        JoinStrategy::MostRecent => searches.last(),
        JoinStrategy::NearestPreceding => searches
            .iter()
            .rev()
            .find(|s| s.timestamp <= interaction.timestamp)
            .or_else(|| searches.first()),
    }
}

/// Build the full training set from the store.
///
/// Interactions whose user row is gone, or whose user never searched, are
/// dropped and counted in [`TrainingSet::skipped`].
pub fn extract_training_set<S>(store: &S, strategy: JoinStrategy) -> PalateResult<TrainingSet>
where
    S: IPreferenceStorage + ?Sized,
{
    let interactions = store.list_interactions()?;
    let span = palate_observability::encode_span!(interactions.len());
    let _guard = span.enter();

    let mut searches_by_user: HashMap<UserId, Vec<SearchRecord>> = HashMap::new();
    for search in store.list_searches()? {
        searches_by_user.entry(search.user_id).or_default().push(search);
    }

    let mut bias_cache: HashMap<UserId, Option<UserBiasState>> = HashMap::new();
    let mut set = TrainingSet::default();

    for interaction in &interactions {
        let bias = match bias_cache.get(&interaction.user_id) {
            Some(cached) => *cached,
            None => {
                let loaded = match store.get_user_data(interaction.user_id) {
                    Ok(bias) => Some(bias),
                    Err(PalateError::MissingUserData { .. }) => None,
                    Err(e) => return Err(e),
                };
                bias_cache.insert(interaction.user_id, loaded);
                loaded
            }
        };
        let Some(bias) = bias else {
            set.skipped += 1;
            continue;
        };

        let searches = searches_by_user
            .get(&interaction.user_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let Some(search) = select_search(searches, interaction, strategy) else {
            set.skipped += 1;
            continue;
        };

        set.rows.push(encode(&bias, search));
        set.labels.push(interaction.feedback.label());
    }

    tracing::debug!(
        rows = set.rows.len(),
        skipped = set.skipped,
        strategy = %strategy,
        "extracted training set"
    );
    Ok(set)
}
