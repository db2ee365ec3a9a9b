//! In-memory store behavior: users, searches, interactions, error mapping.

use chrono::{Duration, Utc};
use palate_core::errors::PalateError;
use palate_core::models::*;
use palate_core::traits::IPreferenceStorage;
use palate_storage::StorageEngine;

fn italian_query() -> SearchQuery {
    SearchQuery {
        cuisines: vec!["italian".to_string()],
        tastes: vec![],
        diet: Diet::Vegetarian,
        price_range: PriceRange::new(1, 3).unwrap(),
        location: "Lisbon".to_string(),
        emotion: Emotion::Happy,
    }
}

// ── Users ─────────────────────────────────────────────────────────────────

#[test]
fn get_or_create_user_creates_once_with_defaults() {
    let engine = StorageEngine::open_in_memory().unwrap();

    let (user, is_new) = engine.get_or_create_user("ana").unwrap();
    assert!(is_new);
    assert_eq!(user.username, "ana");
    assert_eq!(user.temperature_bias, 0.5);
    assert_eq!(user.tourist_bias, 0.5);
    assert_eq!(user.emotion, Emotion::Neutral);
    assert_eq!(user.other_preferences, serde_json::json!({}));

    let (again, is_new) = engine.get_or_create_user("ana").unwrap();
    assert!(!is_new);
    assert_eq!(again.user_id, user.user_id);
    assert_eq!(engine.list_users().unwrap().len(), 1);
}

#[test]
fn empty_username_is_rejected() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(matches!(
        engine.get_or_create_user("   "),
        Err(PalateError::InvalidInput { .. })
    ));
}

#[test]
fn get_user_data_for_unknown_user_is_missing_user_data() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let err = engine.get_user_data(999).unwrap_err();
    assert!(matches!(err, PalateError::MissingUserData { .. }));
    assert!(engine.get_user(999).unwrap().is_none());
}

#[test]
fn mood_selection_updates_emotion() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (user, _) = engine.get_or_create_user("ben").unwrap();

    engine.save_user_setup(user.user_id, Emotion::Sad).unwrap();
    assert_eq!(engine.get_user_data(user.user_id).unwrap().emotion(), Emotion::Sad);

    assert!(matches!(
        engine.save_user_setup(user.user_id + 100, Emotion::Happy),
        Err(PalateError::MissingUserData { .. })
    ));
}

#[test]
fn survey_updates_biases_and_preference_blob() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (user, _) = engine.get_or_create_user("cy").unwrap();

    let answers = SurveyAnswers::new("Strongly Agree", "Agree", "Disagree");
    let state = engine.save_user_preferences(user.user_id, &answers).unwrap();
    assert_eq!(state.temperature_bias(), 0.9);
    assert_eq!(state.tourist_bias(), 0.2);

    let stored = engine.get_user(user.user_id).unwrap().unwrap();
    assert_eq!(stored.other_preferences["q1"], "Strongly Agree");
    assert_eq!(stored.other_preferences["q3"], "Disagree");
}

#[test]
fn null_bias_columns_surface_as_absent() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (user, _) = engine.get_or_create_user("dee").unwrap();
    engine
        .pool()
        .writer
        .with_conn(|conn| {
            conn.execute(
                "UPDATE users SET temperature_bias = NULL, emotion = NULL WHERE user_id = ?1",
                [user.user_id],
            )
            .unwrap();
            Ok(())
        })
        .unwrap();

    let state = engine.get_user_data(user.user_id).unwrap();
    assert_eq!(state.temperature_bias, None);
    assert_eq!(state.emotion, None);
    assert_eq!(state.temperature_bias(), 0.5);
    assert_eq!(state.emotion(), Emotion::Neutral);
}

// ── Searches ──────────────────────────────────────────────────────────────

#[test]
fn recent_search_for_user_without_searches_is_missing_user_data() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (user, _) = engine.get_or_create_user("eve").unwrap();
    assert!(matches!(
        engine.get_recent_search(user.user_id),
        Err(PalateError::MissingUserData { .. })
    ));
}

#[test]
fn search_round_trips_through_storage() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (user, _) = engine.get_or_create_user("fay").unwrap();

    let id = engine.save_search_query(user.user_id, &italian_query()).unwrap();
    let recent = engine.get_recent_search(user.user_id).unwrap();

    assert_eq!(recent.search_id, id);
    assert_eq!(recent.cuisines, vec!["italian".to_string()]);
    assert_eq!(recent.diet, Some(Diet::Vegetarian));
    assert_eq!(recent.price_range, PriceRange { min: 1, max: 3 });
    assert_eq!(recent.location, "Lisbon");
    assert_eq!(recent.emotion, Some(Emotion::Happy));
}

#[test]
fn recent_search_is_latest_by_timestamp_not_insertion() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (user, _) = engine.get_or_create_user("gus").unwrap();
    let now = Utc::now();

    let mut later = italian_query();
    later.cuisines = vec!["Thai".to_string()];
    engine.save_search_query_at(user.user_id, &later, now).unwrap();
    engine
        .save_search_query_at(user.user_id, &italian_query(), now - Duration::hours(1))
        .unwrap();

    assert_eq!(
        engine.get_recent_search(user.user_id).unwrap().cuisines,
        vec!["Thai".to_string()]
    );
    let history = engine.list_searches_for_user(user.user_id).unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].timestamp < history[1].timestamp);
}

#[test]
fn search_for_unknown_user_is_rejected() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(matches!(
        engine.save_search_query(12, &italian_query()),
        Err(PalateError::MissingUserData { .. })
    ));
}

#[test]
fn out_of_range_price_is_rejected_on_save() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (user, _) = engine.get_or_create_user("hal").unwrap();
    let mut query = italian_query();
    query.price_range = PriceRange { min: 0, max: 9 };
    assert!(matches!(
        engine.save_search_query(user.user_id, &query),
        Err(PalateError::InvalidInput { .. })
    ));
}

#[test]
fn malformed_stored_columns_decode_leniently() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (user, _) = engine.get_or_create_user("ivy").unwrap();
    engine
        .pool()
        .writer
        .with_conn(|conn| {
            conn.execute(
                "INSERT INTO searches (user_id, cuisines, tastes, diet, price_range, location, emotion, timestamp)
                 VALUES (?1, '[\"Thai\"]', '[]', 'Pescatarian', '\"cheap\"', '', 'ecstatic', '2024-01-01T00:00:00.000000Z')",
                [user.user_id],
            )
            .unwrap();
            Ok(())
        })
        .unwrap();

    let search = engine.get_recent_search(user.user_id).unwrap();
    assert_eq!(search.diet, None);
    assert_eq!(search.price_range, PriceRange::DEFAULT);
    assert_eq!(search.emotion, Some(Emotion::Neutral));
}

#[test]
fn list_searches_groups_by_user() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (a, _) = engine.get_or_create_user("a").unwrap();
    let (b, _) = engine.get_or_create_user("b").unwrap();
    engine.save_search_query(b.user_id, &italian_query()).unwrap();
    engine.save_search_query(a.user_id, &italian_query()).unwrap();
    engine.save_search_query(b.user_id, &italian_query()).unwrap();

    let all = engine.list_searches().unwrap();
    let users: Vec<UserId> = all.iter().map(|s| s.user_id).collect();
    assert_eq!(users, vec![a.user_id, b.user_id, b.user_id]);
}

// ── Interactions ──────────────────────────────────────────────────────────

#[test]
fn interactions_are_append_only_in_insertion_order() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (user, _) = engine.get_or_create_user("jo").unwrap();

    engine.record_interaction(user.user_id, "Italian", Feedback::Like).unwrap();
    engine.record_interaction(user.user_id, "Thai", Feedback::Dislike).unwrap();

    let all = engine.list_interactions().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].cuisine, "Italian");
    assert_eq!(all[0].feedback, Feedback::Like);
    assert_eq!(all[1].feedback, Feedback::Dislike);
    assert_eq!(engine.count_interactions().unwrap(), 2);
}

#[test]
fn interaction_for_unknown_user_is_rejected() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(engine.record_interaction(5, "Thai", Feedback::Like).is_err());
}
