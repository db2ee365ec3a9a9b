use chrono::Utc;
use palate_core::models::{Diet, Emotion, PriceRange, SearchRecord};
use palate_recommend::select_query_keywords;
use proptest::prelude::*;

fn record(cuisines: Vec<String>) -> SearchRecord {
    SearchRecord {
        search_id: 1,
        user_id: 1,
        cuisines,
        tastes: vec![],
        diet: Some(Diet::Vegan),
        price_range: PriceRange::DEFAULT,
        location: "Coimbra".to_string(),
        emotion: Some(Emotion::Happy),
        timestamp: Utc::now(),
    }
}

#[test]
fn positive_prediction_reuses_recent_cuisines() {
    let recent = record(vec!["Thai".to_string(), "Japanese".to_string()]);
    assert_eq!(select_query_keywords(1, &recent), vec!["Thai", "Japanese"]);
}

#[test]
fn positive_prediction_with_no_cuisines_is_empty() {
    assert!(select_query_keywords(1, &record(vec![])).is_empty());
}

#[test]
fn negative_prediction_is_generic() {
    let recent = record(vec!["Thai".to_string()]);
    assert_eq!(select_query_keywords(0, &recent), vec!["restaurant"]);
}

proptest! {
    #[test]
    fn only_a_positive_prediction_personalizes(prediction in 0u8..=1, cuisines in prop::collection::vec("[A-Za-z]{1,10}", 0..5)) {
        let recent = record(cuisines.clone());
        let keywords = select_query_keywords(prediction, &recent);
        if prediction == 1 {
            prop_assert_eq!(keywords, cuisines);
        } else {
            prop_assert_eq!(keywords, vec!["restaurant".to_string()]);
        }
    }
}
