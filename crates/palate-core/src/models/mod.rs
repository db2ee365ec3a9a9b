mod interaction;
mod model_artifact;
mod search;
mod survey;
mod user;

pub use interaction::{Feedback, Interaction, InteractionId};
pub use model_artifact::StoredModel;
pub use search::{title_case, Diet, PriceRange, SearchId, SearchQuery, SearchRecord};
pub use survey::{calculate_temperature_bias, calculate_tourist_bias, Likert, SurveyAnswers};
pub use user::{Emotion, UserBiasState, UserId, UserInfo};
