//! Per-user session state, passed explicitly to every service action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use palate_core::constants::CUISINES;
use palate_core::models::{Emotion, UserId, UserInfo};

/// Where a session is in the onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupStage {
    AwaitingMood,
    /// New users rate each cuisine once; `next_index` is the next card.
    Swiping { next_index: usize },
    AwaitingSurvey,
    Complete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub user: UserInfo,
    /// True when `open_session` created the user.
    pub is_new_user: bool,
    pub mood: Option<Emotion>,
    pub swipes_recorded: usize,
    pub survey_completed: bool,
}

impl SessionContext {
    pub fn new(user: UserInfo, is_new_user: bool) -> Self {
        let now = Utc::now();
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            created_at: now,
            last_activity: now,
            user,
            is_new_user,
            mood: None,
            swipes_recorded: 0,
            survey_completed: false,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user.user_id
    }

    /// Returning users are done once they pick a mood. New users also swipe
    /// through every cuisine and answer the survey.
    pub fn stage(&self) -> SetupStage {
        if self.mood.is_none() {
            SetupStage::AwaitingMood
        } else if !self.is_new_user {
            SetupStage::Complete
        } else if self.swipes_recorded < CUISINES.len() {
            SetupStage::Swiping {
                next_index: self.swipes_recorded,
            }
        } else if !self.survey_completed {
            SetupStage::AwaitingSurvey
        } else {
            SetupStage::Complete
        }
    }

    pub fn is_setup_complete(&self) -> bool {
        self.stage() == SetupStage::Complete
    }

    pub(crate) fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}
