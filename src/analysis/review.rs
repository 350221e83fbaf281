// src/analysis/review.rs
use crate::error::{AssistError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSuggestions {
    pub section: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Resume feedback against one job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeReview {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub improvement_suggestions: Vec<SectionSuggestions>,
}

impl ResumeReview {
    pub fn from_value(value: Value) -> Result<Self> {
        let review: ResumeReview = serde_json::from_value(value).map_err(|e| {
            warn!("Review response does not match schema: {}", e);
            AssistError::MalformedResponse
        })?;

        if review.strengths.is_empty()
            && review.weaknesses.is_empty()
            && review.improvement_suggestions.is_empty()
        {
            warn!("Review response contained no feedback");
            return Err(AssistError::MalformedResponse);
        }
        Ok(review)
    }
}
