// src/types/response.rs
//! Caller-facing result shape shared by the HTTP API, the CLI and the batch
//! scraper: `{success: true, ...payload}` or `{success: false, error}`.

use crate::analysis::{JobMatch, ResumeReview};
use crate::error::AssistError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(payload: T) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(error),
        }
    }

    pub fn from_result(result: Result<T, AssistError>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverLetterPayload {
    pub cover_letter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisPayload {
    pub results: Vec<JobMatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewPayload {
    pub review: ResumeReview,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchPayload {
    pub results: Vec<crate::job_scraping::BatchItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompiledLetterPayload {
    pub cover_letter: String,
    pub document_path: Option<String>,
}
