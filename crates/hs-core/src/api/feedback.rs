use serde::{Deserialize, Serialize};

/// Human-reviewed score submission. Texts arrive raw; the store normalizes
/// them before the row is written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackRequest {
    pub resume_text: String,
    pub jd_text: String,
    pub human_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackResponse {
    pub message: String,
}

impl FeedbackResponse {
    pub fn saved() -> Self {
        Self {
            message: "Training data saved successfully!".into(),
        }
    }
}
