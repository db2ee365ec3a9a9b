use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Emotion, UserId};
use crate::constants::{PRICE_LEVEL_MAX, PRICE_LEVEL_MIN};
use crate::errors::{PalateError, PalateResult};

pub type SearchId = i64;

/// Dietary restriction. Declaration order is the one-hot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diet {
    Vegan,
    Vegetarian,
    #[serde(rename = "None")]
    Unrestricted,
}

impl Diet {
    /// One-hot order: `[Vegan, Vegetarian, None]`.
    pub const ALL: [Diet; 3] = [Diet::Vegan, Diet::Vegetarian, Diet::Unrestricted];

    pub fn as_str(self) -> &'static str {
        match self {
            Diet::Vegan => "Vegan",
            Diet::Vegetarian => "Vegetarian",
            Diet::Unrestricted => "None",
        }
    }

    /// Exact match against the stored spelling. Anything else is unrecognized.
    pub fn parse_stored(raw: &str) -> Option<Self> {
        Diet::ALL.into_iter().find(|d| d.as_str() == raw)
    }

    /// Position of this diet's flag within the diet block.
    pub fn flag_index(self) -> usize {
        self as usize
    }
}

impl FromStr for Diet {
    type Err = PalateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Diet::parse_stored(s).ok_or_else(|| {
            PalateError::invalid(
                "diet",
                format!("expected None, Vegetarian or Vegan, got {s:?}"),
            )
        })
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive price-level window, levels 1–4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "[i64; 2]", from = "[i64; 2]")]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    pub const DEFAULT: PriceRange = PriceRange {
        min: PRICE_LEVEL_MIN,
        max: PRICE_LEVEL_MAX,
    };

    /// Validated constructor for new searches.
    pub fn new(min: i64, max: i64) -> PalateResult<Self> {
        let levels = PRICE_LEVEL_MIN..=PRICE_LEVEL_MAX;
        if !levels.contains(&min) || !levels.contains(&max) {
            return Err(PalateError::invalid(
                "price_range",
                format!("levels must be within {PRICE_LEVEL_MIN}..={PRICE_LEVEL_MAX}, got [{min}, {max}]"),
            ));
        }
        if min > max {
            return Err(PalateError::invalid(
                "price_range",
                format!("min {min} exceeds max {max}"),
            ));
        }
        Ok(Self { min, max })
    }

    /// Decode a stored value. Anything that is not exactly two integers
    /// falls back to [`PriceRange::DEFAULT`].
    pub fn from_stored(raw: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => Self::from_json(&value),
            Err(_) => Self::DEFAULT,
        }
    }

    pub fn from_json(value: &serde_json::Value) -> Self {
        let Some(items) = value.as_array() else {
            return Self::DEFAULT;
        };
        match items.as_slice() {
            [lo, hi] => match (lo.as_i64(), hi.as_i64()) {
                (Some(min), Some(max)) => Self { min, max },
                _ => Self::DEFAULT,
            },
            _ => Self::DEFAULT,
        }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<PriceRange> for [i64; 2] {
    fn from(p: PriceRange) -> Self {
        [p.min, p.max]
    }
}

impl From<[i64; 2]> for PriceRange {
    fn from([min, max]: [i64; 2]) -> Self {
        Self { min, max }
    }
}

/// A search as submitted, before the store assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub cuisines: Vec<String>,
    pub tastes: Vec<String>,
    pub diet: Diet,
    pub price_range: PriceRange,
    pub location: String,
    pub emotion: Emotion,
}

impl SearchQuery {
    pub fn validate(&self) -> PalateResult<()> {
        PriceRange::new(self.price_range.min, self.price_range.max)?;
        Ok(())
    }
}

/// A persisted, immutable search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub search_id: SearchId,
    pub user_id: UserId,
    pub cuisines: Vec<String>,
    pub tastes: Vec<String>,
    /// `None` when the stored value is not a recognized diet.
    pub diet: Option<Diet>,
    pub price_range: PriceRange,
    pub location: String,
    pub emotion: Option<Emotion>,
    pub timestamp: DateTime<Utc>,
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest,
/// so `"ITALIAN"`, `"italian"` and `"iTaLiAn"` all become `"Italian"`.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
