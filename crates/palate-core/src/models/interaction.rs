use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::errors::{PalateError, PalateResult};

pub type InteractionId = i64;

/// Like/dislike bit. The discriminant is the training label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Dislike = 0,
    Like = 1,
}

impl Feedback {
    pub fn from_liked(liked: bool) -> Self {
        if liked {
            Feedback::Like
        } else {
            Feedback::Dislike
        }
    }

    pub fn label(self) -> u8 {
        self as u8
    }

    pub fn from_label(label: i64) -> PalateResult<Self> {
        match label {
            0 => Ok(Feedback::Dislike),
            1 => Ok(Feedback::Like),
            other => Err(PalateError::invalid(
                "feedback",
                format!("expected 0 or 1, got {other}"),
            )),
        }
    }
}

/// One append-only feedback event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub interaction_id: InteractionId,
    pub user_id: UserId,
    /// Cuisine label the feedback was given on.
    pub cuisine: String,
    pub feedback: Feedback,
    pub timestamp: DateTime<Utc>,
}
