use palate_core::models::{Emotion, UserInfo};
use palate_recommend::{SessionContext, SetupStage};

fn session(is_new: bool) -> SessionContext {
    SessionContext::new(UserInfo::new_default(1, "lia"), is_new)
}

#[test]
fn sessions_get_distinct_ids() {
    assert_ne!(session(true).session_id, session(true).session_id);
}

#[test]
fn returning_user_completes_after_mood() {
    let mut ctx = session(false);
    assert_eq!(ctx.stage(), SetupStage::AwaitingMood);
    ctx.mood = Some(Emotion::Happy);
    assert!(ctx.is_setup_complete());
}

#[test]
fn new_user_swipes_every_cuisine_then_answers_survey() {
    let mut ctx = session(true);
    ctx.mood = Some(Emotion::Sad);
    assert_eq!(ctx.stage(), SetupStage::Swiping { next_index: 0 });

    ctx.swipes_recorded = 7;
    assert_eq!(ctx.stage(), SetupStage::Swiping { next_index: 7 });

    ctx.swipes_recorded = 8;
    assert_eq!(ctx.stage(), SetupStage::AwaitingSurvey);

    ctx.survey_completed = true;
    assert_eq!(ctx.stage(), SetupStage::Complete);
}
