// src/analysis/assembler.rs
//! Turns the backend's `{"jobs": [...]}` answer into report entries that
//! always carry a title, a company and at least three recommendations.

use crate::error::{AssistError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::{info, warn};

pub const FALLBACK_RECOMMENDATIONS: [&str; 3] = [
    "Highlight relevant project achievements",
    "Quantify your impact with metrics",
    "Add specific examples of team leadership",
];

pub const DEFAULT_JOB_TITLE: &str = "Position";
pub const DEFAULT_COMPANY_NAME: &str = "Company";

const MIN_RECOMMENDATIONS: usize = FALLBACK_RECOMMENDATIONS.len();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub job_title: String,
    pub company_name: String,
    pub job_link: String,
    /// 0 to 100, integral when the backend sent an integer.
    pub match_percentage: Number,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
}

pub fn assemble(analysis: Value) -> Result<Vec<JobMatch>> {
    let jobs = match analysis {
        Value::Object(mut object) => match object.remove("jobs") {
            Some(Value::Array(jobs)) => jobs,
            _ => {
                warn!("Analysis response has no 'jobs' array");
                return Err(AssistError::InvalidStructure);
            }
        },
        _ => {
            warn!("Analysis response is not a JSON object");
            return Err(AssistError::InvalidStructure);
        }
    };

    let matches = jobs
        .into_iter()
        .map(|job| match job {
            Value::Object(fields) => Ok(normalize_job(&fields)),
            _ => Err(AssistError::InvalidStructure),
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Assembled analysis for {} jobs", matches.len());
    Ok(matches)
}

fn normalize_job(fields: &Map<String, Value>) -> JobMatch {
    let job_title = text_field(fields, "job_title").unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string());
    let company_name =
        text_field(fields, "company_name").unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string());

    let mut recommendations = list_field(fields, "recommendations");
    if recommendations.len() < MIN_RECOMMENDATIONS {
        warn!(
            "Only {} recommendations for '{}', adding fallbacks",
            recommendations.len(),
            job_title
        );
        for fallback in FALLBACK_RECOMMENDATIONS {
            if recommendations.len() >= MIN_RECOMMENDATIONS {
                break;
            }
            if !recommendations.iter().any(|r| r == fallback) {
                recommendations.push(fallback.to_string());
            }
        }
    }

    JobMatch {
        job_title,
        company_name,
        job_link: text_field(fields, "job_link").unwrap_or_default(),
        match_percentage: percentage_field(fields, "match_percentage"),
        matching_skills: list_field(fields, "matching_skills"),
        missing_skills: list_field(fields, "missing_skills"),
        recommendations,
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Accepts `85`, `85.5` or `"85%"`; clamps into 0..=100, missing is 0.
/// Integers stay integers.
fn percentage_field(fields: &Map<String, Value>, key: &str) -> Number {
    let raw = match fields.get(key) {
        Some(Value::Number(n)) => Some(n.clone()),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<Number>().ok(),
        _ => None,
    };
    raw.and_then(|n| clamp_percentage(&n))
        .unwrap_or_else(|| Number::from(0))
}

fn clamp_percentage(n: &Number) -> Option<Number> {
    if let Some(i) = n.as_i64() {
        return Some(Number::from(i.clamp(0, 100)));
    }
    if let Some(u) = n.as_u64() {
        return Some(Number::from(u.min(100)));
    }
    n.as_f64()
        .filter(|v| v.is_finite())
        .and_then(|v| Number::from_f64(v.clamp(0.0, 100.0)))
}

/// A list of distinct, non-empty strings in first-seen order. A bare string
/// is split on commas.
fn list_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    let items: Vec<String> = match fields.get(key) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    let mut distinct: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim();
        if !item.is_empty() && !distinct.iter().any(|seen| seen == item) {
            distinct.push(item.to_string());
        }
    }
    distinct
}
