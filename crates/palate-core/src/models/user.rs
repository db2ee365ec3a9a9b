use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TEMPERATURE_BIAS, DEFAULT_TOURIST_BIAS};
use crate::errors::PalateError;

/// Store-assigned user identifier.
pub type UserId = i64;

/// A user's self-reported mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Sad,
    #[default]
    Neutral,
    Happy,
}

impl Emotion {
    pub const ALL: [Emotion; 3] = [Emotion::Sad, Emotion::Neutral, Emotion::Happy];

    /// Integer encoding used in the feature vector: sad=0, neutral=1, happy=2.
    pub fn as_feature(self) -> f64 {
        match self {
            Emotion::Sad => 0.0,
            Emotion::Neutral => 1.0,
            Emotion::Happy => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Sad => "sad",
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
        }
    }

    /// Parse a stored value, treating anything unrecognized as neutral.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl FromStr for Emotion {
    type Err = PalateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sad" => Ok(Emotion::Sad),
            "neutral" => Ok(Emotion::Neutral),
            "happy" => Ok(Emotion::Happy),
            other => Err(PalateError::invalid(
                "emotion",
                format!("expected happy, neutral or sad, got {other:?}"),
            )),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A full user row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: UserId,
    pub username: String,
    pub temperature_bias: f64,
    pub tourist_bias: f64,
    pub emotion: Emotion,
    /// Free-form preference blob; survey answers land here.
    pub other_preferences: serde_json::Value,
}

impl UserInfo {
    /// A freshly created user with default biases.
    pub fn new_default(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            temperature_bias: DEFAULT_TEMPERATURE_BIAS,
            tourist_bias: DEFAULT_TOURIST_BIAS,
            emotion: Emotion::Neutral,
            other_preferences: serde_json::json!({}),
        }
    }

    pub fn bias_state(&self) -> UserBiasState {
        UserBiasState {
            temperature_bias: Some(self.temperature_bias),
            tourist_bias: Some(self.tourist_bias),
            emotion: Some(self.emotion),
        }
    }
}

/// The part of a user the feature encoder consumes.
///
/// Each field may be absent (NULL column, partially migrated row); the
/// accessors resolve absent values to the documented defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UserBiasState {
    pub temperature_bias: Option<f64>,
    pub tourist_bias: Option<f64>,
    pub emotion: Option<Emotion>,
}

impl UserBiasState {
    pub fn new(temperature_bias: f64, tourist_bias: f64, emotion: Emotion) -> Self {
        Self {
            temperature_bias: Some(temperature_bias),
            tourist_bias: Some(tourist_bias),
            emotion: Some(emotion),
        }
    }

    pub fn temperature_bias(&self) -> f64 {
        self.temperature_bias.unwrap_or(DEFAULT_TEMPERATURE_BIAS)
    }

    pub fn tourist_bias(&self) -> f64 {
        self.tourist_bias.unwrap_or(DEFAULT_TOURIST_BIAS)
    }

    pub fn emotion(&self) -> Emotion {
        self.emotion.unwrap_or_default()
    }
}
