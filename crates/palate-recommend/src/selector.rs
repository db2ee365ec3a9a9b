use palate_core::constants::GENERIC_QUERY_KEYWORD;
use palate_core::errors::RecommendationError;
use palate_core::models::SearchRecord;

/// Keywords for the place search.
///
/// A positive prediction reuses the cuisines of the most recent search (an
/// empty list means no cuisine filter); anything else falls back to the
/// generic keyword.
pub fn select_query_keywords(prediction: u8, recent_search: &SearchRecord) -> Vec<String> {
    if prediction == 1 {
        recent_search.cuisines.clone()
    } else {
        vec![GENERIC_QUERY_KEYWORD.to_string()]
    }
}

/// Keywords plus the reason they are empty, if they are.
#[derive(Debug)]
pub struct Recommendation {
    pub keywords: Vec<String>,
    pub warning: Option<RecommendationError>,
}

impl Recommendation {
    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}
