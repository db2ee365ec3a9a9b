//! The single encoding path.

use palate_core::constants::{CUISINES, DIET_FLAGS, FEATURE_WIDTH, TASTES};
use palate_core::models::{title_case, Diet, SearchRecord, UserBiasState};

use crate::FeatureVector;

const CUISINE_OFFSET: usize = 3;
const TASTE_OFFSET: usize = CUISINE_OFFSET + CUISINES.len();
const DIET_OFFSET: usize = TASTE_OFFSET + TASTES.len();
const PRICE_OFFSET: usize = DIET_OFFSET + DIET_FLAGS;

const _: () = assert!(PRICE_OFFSET + 2 == FEATURE_WIDTH);

/// Encode a user's bias state and one of their searches.
///
/// Never fails: absent bias values resolve to defaults, unknown
/// cuisine/taste labels are dropped, an unrecognized diet leaves all diet
/// flags at zero, and the price range was already normalized on decode.
pub fn encode(bias: &UserBiasState, search: &SearchRecord) -> FeatureVector {
    let mut v = [0.0_f64; FEATURE_WIDTH];

    v[0] = bias.temperature_bias();
    v[1] = bias.tourist_bias();
    v[2] = bias.emotion().as_feature();

    set_flags(&mut v[CUISINE_OFFSET..TASTE_OFFSET], &CUISINES, &search.cuisines);
    set_flags(&mut v[TASTE_OFFSET..DIET_OFFSET], &TASTES, &search.tastes);

    if let Some(diet) = search.diet {
        v[DIET_OFFSET + diet.flag_index()] = 1.0;
    }

    v[PRICE_OFFSET] = search.price_range.min as f64;
    v[PRICE_OFFSET + 1] = search.price_range.max as f64;

    tracing::trace!(
        user_id = search.user_id,
        search_id = search.search_id,
        "encoded feature vector"
    );
    FeatureVector::from_array(v)
}

fn set_flags(block: &mut [f64], vocabulary: &[&str], labels: &[String]) {
    for label in labels {
        let normalized = title_case(label);
        if let Some(pos) = vocabulary.iter().position(|v| *v == normalized) {
            block[pos] = 1.0;
        }
    }
}

/// Ordered names of every feature column.
pub fn feature_names() -> Vec<String> {
    let mut names = Vec::with_capacity(FEATURE_WIDTH);
    names.push("temperature_bias".to_string());
    names.push("tourist_bias".to_string());
    names.push("emotion".to_string());
    names.extend(CUISINES.iter().map(|c| format!("cuisine_{}", c.to_lowercase())));
    names.extend(TASTES.iter().map(|t| format!("taste_{}", t.to_lowercase())));
    names.extend(Diet::ALL.iter().map(|d| format!("diet_{}", d.as_str().to_lowercase())));
    names.push("price_min".to_string());
    names.push("price_max".to_string());
    names
}
