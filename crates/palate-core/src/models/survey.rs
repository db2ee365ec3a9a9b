use serde::{Deserialize, Serialize};

/// Five-point agreement scale used by the onboarding survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Likert {
    #[serde(rename = "Strongly Agree")]
    StronglyAgree,
    Agree,
    Indifferent,
    Disagree,
    #[serde(rename = "Strongly Disagree")]
    StronglyDisagree,
}

impl Likert {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Strongly Agree" => Some(Likert::StronglyAgree),
            "Agree" => Some(Likert::Agree),
            "Indifferent" => Some(Likert::Indifferent),
            "Disagree" => Some(Likert::Disagree),
            "Strongly Disagree" => Some(Likert::StronglyDisagree),
            _ => None,
        }
    }

    /// 5 (strongly agree) down to 1 (strongly disagree).
    fn score(self) -> u8 {
        match self {
            Likert::StronglyAgree => 5,
            Likert::Agree => 4,
            Likert::Indifferent => 3,
            Likert::Disagree => 2,
            Likert::StronglyDisagree => 1,
        }
    }

    fn tourist_weight(self) -> f64 {
        match self {
            Likert::StronglyAgree => 1.0,
            Likert::Agree => 0.8,
            Likert::Indifferent => 0.5,
            Likert::Disagree => 0.2,
            Likert::StronglyDisagree => 0.0,
        }
    }
}

/// Raw answers to the three onboarding questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAnswers {
    /// "I enjoy cold food."
    pub q1: String,
    /// "I enjoy warm food."
    pub q2: String,
    /// "I prefer local food."
    pub q3: String,
}

impl SurveyAnswers {
    pub fn new(q1: impl Into<String>, q2: impl Into<String>, q3: impl Into<String>) -> Self {
        Self {
            q1: q1.into(),
            q2: q2.into(),
            q3: q3.into(),
        }
    }

    pub fn temperature_bias(&self) -> f64 {
        calculate_temperature_bias(&self.q1, &self.q2)
    }

    pub fn tourist_bias(&self) -> f64 {
        calculate_tourist_bias(&self.q3)
    }

    /// The preference blob persisted on the user row.
    pub fn to_preferences(&self) -> serde_json::Value {
        serde_json::json!({ "q1": self.q1, "q2": self.q2, "q3": self.q3 })
    }
}

/// `(score(cold) + score(warm)) / 10`; unrecognized answers score 3.
pub fn calculate_temperature_bias(cold: &str, warm: &str) -> f64 {
    let score = |raw: &str| Likert::parse(raw).map_or(3, Likert::score);
    f64::from(score(cold) + score(warm)) / 10.0
}

/// Agreement with "I prefer local food"; unrecognized answers give 0.5.
pub fn calculate_tourist_bias(local: &str) -> f64 {
    Likert::parse(local).map_or(0.5, Likert::tourist_weight)
}
