/// Palate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cuisine vocabulary, in feature order. Swipe indices also index into this.
pub const CUISINES: [&str; 8] = [
    "Italian",
    "American",
    "Mexican",
    "Japanese",
    "Asian",
    "European",
    "Mediterranean",
    "Thai",
];

/// Taste vocabulary, in feature order.
pub const TASTES: [&str; 6] = ["Sweet", "Salty", "Sour", "Bitter", "Umami", "Spicy"];

/// Number of diet flags (`[Vegan, Vegetarian, None]`).
pub const DIET_FLAGS: usize = 3;

/// Width of every feature vector: 3 scalars + cuisines + tastes + diets + 2 prices.
pub const FEATURE_WIDTH: usize = 22;

const _: () = assert!(3 + CUISINES.len() + TASTES.len() + DIET_FLAGS + 2 == FEATURE_WIDTH);

/// Bumped whenever the feature order or width changes. Persisted models
/// carrying a different version are refused at load time.
pub const FEATURE_SCHEMA_VERSION: u32 = 1;

/// Bias defaults for new users and for missing columns.
pub const DEFAULT_TEMPERATURE_BIAS: f64 = 0.5;
pub const DEFAULT_TOURIST_BIAS: f64 = 0.5;

/// Price range bounds and fallback.
pub const PRICE_LEVEL_MIN: i64 = 1;
pub const PRICE_LEVEL_MAX: i64 = 4;

/// Keyword used when the classifier does not vote for personalization.
pub const GENERIC_QUERY_KEYWORD: &str = "restaurant";

/// Label recorded for swipes whose index falls outside [`CUISINES`].
pub const UNKNOWN_CUISINE: &str = "Unknown";

/// Classifier defaults.
pub const DEFAULT_RANDOM_SEED: u64 = 42;
pub const DEFAULT_TREE_COUNT: usize = 100;
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;

/// Default database file.
pub const DEFAULT_DB_PATH: &str = "recommendation.db";

/// Default number of read connections for file-backed stores.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Map a swipe index to its cuisine label.
pub fn cuisine_for_swipe_index(index: usize) -> &'static str {
    CUISINES.get(index).copied().unwrap_or(UNKNOWN_CUISINE)
}
