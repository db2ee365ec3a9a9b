use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// How an interaction is matched to one of its user's searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// The user's most recent search, regardless of when the feedback happened.
    #[default]
    MostRecent,
    /// The latest search at or before the interaction; the user's earliest
    /// search when none precedes it.
    NearestPreceding,
}

impl FromStr for JoinStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "most_recent" => Ok(JoinStrategy::MostRecent),
            "nearest_preceding" => Ok(JoinStrategy::NearestPreceding),
            other => Err(ConfigError::InvalidValue {
                field: "retrain.join_strategy".to_string(),
                message: format!("unknown strategy {other:?}"),
            }),
        }
    }
}

impl fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinStrategy::MostRecent => f.write_str("most_recent"),
            JoinStrategy::NearestPreceding => f.write_str("nearest_preceding"),
        }
    }
}

/// Retrain trigger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrainConfig {
    pub join_strategy: JoinStrategy,
    /// Minimum seconds between two retrains. 0 retrains on every trigger.
    pub min_interval_secs: u64,
    /// Minimum interactions recorded since the last retrain. 0 disables the check.
    pub min_new_interactions: usize,
    /// Run retrains on a background worker instead of the request path.
    pub background: bool,
}

impl Default for RetrainConfig {
    fn default() -> Self {
        Self {
            join_strategy: JoinStrategy::default(),
            min_interval_secs: 0,
            min_new_interactions: 0,
            background: false,
        }
    }
}
