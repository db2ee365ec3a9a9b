//! Training-set extraction: joins, skips, and schema identity.

use chrono::{DateTime, Duration, TimeZone, Utc};
use palate_core::config::JoinStrategy;
use palate_core::models::*;
use palate_core::traits::IPreferenceStorage;
use palate_features::encode;
use palate_storage::StorageEngine;
use palate_training::{extract_training_set, select_search};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn query(cuisine: &str, diet: Diet) -> SearchQuery {
    SearchQuery {
        cuisines: vec![cuisine.to_string()],
        tastes: vec!["Spicy".to_string()],
        diet,
        price_range: PriceRange::new(2, 4).unwrap(),
        location: "Porto".to_string(),
        emotion: Emotion::Neutral,
    }
}

// ── Joins ────────────────────────────────────────────────────────────────

#[test]
fn one_interaction_one_search_yields_one_row() {
    let store = StorageEngine::open_in_memory().unwrap();
    let (user, _) = store.get_or_create_user("rui").unwrap();
    store
        .save_search_query_at(user.user_id, &query("Thai", Diet::Vegan), t0())
        .unwrap();
    store
        .record_interaction_at(user.user_id, "Thai", Feedback::Like, t0() + Duration::minutes(1))
        .unwrap();

    let set = extract_training_set(&store, JoinStrategy::MostRecent).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.labels, vec![1]);
    assert_eq!(set.skipped, 0);
}

#[test]
fn most_recent_uses_latest_search_for_every_interaction() {
    let store = StorageEngine::open_in_memory().unwrap();
    let (user, _) = store.get_or_create_user("rui").unwrap();
    store
        .record_interaction_at(user.user_id, "Italian", Feedback::Dislike, t0())
        .unwrap();
    store
        .save_search_query_at(user.user_id, &query("Italian", Diet::Vegan), t0() + Duration::hours(1))
        .unwrap();
    store
        .save_search_query_at(user.user_id, &query("Mexican", Diet::Vegetarian), t0() + Duration::hours(2))
        .unwrap();

    let set = extract_training_set(&store, JoinStrategy::MostRecent).unwrap();
    let latest = store.get_recent_search(user.user_id).unwrap();
    let bias = store.get_user_data(user.user_id).unwrap();
    assert_eq!(set.rows, vec![encode(&bias, &latest)]);
    assert_eq!(set.labels, vec![0]);
}

#[test]
fn nearest_preceding_picks_search_before_interaction() {
    let store = StorageEngine::open_in_memory().unwrap();
    let (user, _) = store.get_or_create_user("rui").unwrap();
    let id = user.user_id;
    store.save_search_query_at(id, &query("Italian", Diet::Vegan), t0()).unwrap();
    store
        .save_search_query_at(id, &query("Mexican", Diet::Vegetarian), t0() + Duration::hours(2))
        .unwrap();
    store.record_interaction_at(id, "Italian", Feedback::Like, t0() + Duration::hours(1)).unwrap();
    store.record_interaction_at(id, "Mexican", Feedback::Dislike, t0() + Duration::hours(3)).unwrap();

    let set = extract_training_set(&store, JoinStrategy::NearestPreceding).unwrap();
    let searches = store.list_searches_for_user(id).unwrap();
    let bias = store.get_user_data(id).unwrap();
    assert_eq!(set.rows[0], encode(&bias, &searches[0]));
    assert_eq!(set.rows[1], encode(&bias, &searches[1]));
    assert_eq!(set.labels, vec![1, 0]);
}

#[test]
fn nearest_preceding_falls_back_to_earliest() {
    let store = StorageEngine::open_in_memory().unwrap();
    let (user, _) = store.get_or_create_user("rui").unwrap();
    let id = user.user_id;
    store.record_interaction_at(id, "Thai", Feedback::Like, t0()).unwrap();
    store
        .save_search_query_at(id, &query("Thai", Diet::Vegan), t0() + Duration::hours(1))
        .unwrap();
    store
        .save_search_query_at(id, &query("Asian", Diet::Vegan), t0() + Duration::hours(2))
        .unwrap();

    let interactions = store.list_interactions().unwrap();
    let searches = store.list_searches_for_user(id).unwrap();
    let chosen = select_search(&searches, &interactions[0], JoinStrategy::NearestPreceding).unwrap();
    assert_eq!(chosen.search_id, searches[0].search_id);
}

#[test]
fn select_search_on_empty_history_is_none() {
    let interaction = Interaction {
        interaction_id: 1,
        user_id: 1,
        cuisine: "Thai".to_string(),
        feedback: Feedback::Like,
        timestamp: t0(),
    };
    for strategy in [JoinStrategy::MostRecent, JoinStrategy::NearestPreceding] {
        assert!(select_search(&[], &interaction, strategy).is_none());
    }
}

// ── Skips ────────────────────────────────────────────────────────────────

#[test]
fn users_without_searches_are_skipped_and_counted() {
    let store = StorageEngine::open_in_memory().unwrap();
    let (searcher, _) = store.get_or_create_user("searcher").unwrap();
    let (silent, _) = store.get_or_create_user("silent").unwrap();
    store
        .save_search_query_at(searcher.user_id, &query("Thai", Diet::Vegan), t0())
        .unwrap();
    store.record_interaction_at(searcher.user_id, "Thai", Feedback::Like, t0()).unwrap();
    store.record_interaction_at(silent.user_id, "Thai", Feedback::Like, t0()).unwrap();
    store.record_interaction_at(silent.user_id, "Asian", Feedback::Dislike, t0()).unwrap();

    let set = extract_training_set(&store, JoinStrategy::MostRecent).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.skipped, 2);
}

#[test]
fn interactions_of_missing_users_are_skipped() {
    let store = StorageEngine::open_in_memory().unwrap();
    store
        .pool()
        .writer
        .with_conn(|conn| {
            conn.execute_batch(
                "PRAGMA foreign_keys = OFF;
                 INSERT INTO interactions (user_id, cuisine, feedback, timestamp)
                 VALUES (999, 'Thai', 1, '2024-03-01T12:00:00.000000Z');
                 PRAGMA foreign_keys = ON;",
            )
            .unwrap();
            Ok(())
        })
        .unwrap();

    let set = extract_training_set(&store, JoinStrategy::MostRecent).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.skipped, 1);
}

#[test]
fn empty_store_yields_empty_set() {
    let store = StorageEngine::open_in_memory().unwrap();
    let set = extract_training_set(&store, JoinStrategy::MostRecent).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.skipped, 0);
}

// ── Schema identity ──────────────────────────────────────────────────────

#[test]
fn extraction_and_prediction_encode_identically() {
    let store = StorageEngine::open_in_memory().unwrap();
    let (user, _) = store.get_or_create_user("ines").unwrap();
    store
        .save_user_preferences(
            user.user_id,
            &SurveyAnswers::new("Agree", "Strongly Disagree", "Indifferent"),
        )
        .unwrap();
    store.save_user_setup(user.user_id, Emotion::Sad).unwrap();
    store
        .save_search_query_at(user.user_id, &query("japanese", Diet::Unrestricted), t0())
        .unwrap();
    store.record_interaction_at(user.user_id, "Japanese", Feedback::Like, t0()).unwrap();

    let set = extract_training_set(&store, JoinStrategy::MostRecent).unwrap();

    let bias = store.get_user_data(user.user_id).unwrap();
    let recent = store.get_recent_search(user.user_id).unwrap();
    let single = encode(&bias, &recent);
    assert!(set.rows[0].bitwise_eq(&single));
}
