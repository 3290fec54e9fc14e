use serde::{Deserialize, Serialize};

use crate::scoring::{MatchResult, MatchStatus};

/// JSON shape of one scoring outcome, matching the contract the reviewing
/// GUI consumes (`matchScore` camelCase, the rest snake/plain keys).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    pub status: MatchStatus,
    pub redacted_resume: String,
    pub summary: String,
    pub matching: Vec<String>,
    pub missing: Vec<String>,
    pub questions: Vec<String>,
}

impl From<MatchResult> for MatchResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            match_score: result.score,
            status: result.status,
            redacted_resume: result.redacted_resume,
            matching: result.matching_keywords.into_iter().collect(),
            missing: result.missing_keywords,
            summary: result.summary,
            questions: result.follow_up_questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn serializes_with_the_wire_field_names() {
        let result = MatchResult {
            score: 72.4,
            status: MatchStatus::Shortlisted,
            redacted_resume: "python dev...".into(),
            matching_keywords: BTreeSet::from(["python".to_string()]),
            missing_keywords: vec!["kubernetes".into()],
            keyword_score: 50.0,
            semantic_score: 80.0,
            summary: "Hybrid Analysis: Semantic (80%) + Keywords (50%).".into(),
            follow_up_questions: vec!["Tell me about your experience with kubernetes?".into()],
        };

        let json = serde_json::to_value(MatchResponse::from(result)).unwrap();
        assert_eq!(json["matchScore"], 72.4);
        assert_eq!(json["status"], "Shortlisted");
        assert_eq!(json["matching"][0], "python");
        assert_eq!(json["missing"][0], "kubernetes");
        assert!(json["questions"][0]
            .as_str()
            .unwrap()
            .starts_with("Tell me about"));
    }
}
