// src/job_scraping/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TITLE_NOT_FOUND: &str = "Position Not Found";
pub const COMPANY_NOT_FOUND: &str = "Company Not Found";

pub const MSG_ACCESS_DENIED: &str =
    "Unable to automatically fetch job description. Please enter the job description manually.";
pub const MSG_FETCH_FAILED: &str = "Unable to fetch job description. Please enter it manually.";
pub const MSG_NO_DESCRIPTION: &str =
    "Unable to automatically extract job description. Please enter the job description manually.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Indeed,
    LinkedIn,
    Other,
    Unknown,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Indeed => "Indeed",
            Platform::LinkedIn => "LinkedIn",
            Platform::Other => "Other",
            Platform::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Title, company and platform pulled from a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetails {
    pub title: String,
    pub company_name: String,
    pub platform: Platform,
}

impl JobDetails {
    pub fn not_found(platform: Platform) -> Self {
        Self {
            title: TITLE_NOT_FOUND.to_string(),
            company_name: COMPANY_NOT_FOUND.to_string(),
            platform,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub requires_manual_entry: bool,
}

impl Description {
    pub fn manual_entry(message: &str) -> Self {
        Self {
            text: message.to_string(),
            requires_manual_entry: true,
        }
    }
}

/// One scraped job posting. Built once per scrape call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub url: String,
    pub platform: Platform,
    #[serde(rename = "job_title")]
    pub title: String,
    pub company_name: String,
    pub description: String,
    pub requires_manual_entry: bool,
}

impl JobPosting {
    pub fn from_parts(url: &str, details: JobDetails, description: Description) -> Self {
        Self {
            url: url.to_string(),
            platform: details.platform,
            title: details.title,
            company_name: details.company_name,
            description: description.text,
            requires_manual_entry: description.requires_manual_entry,
        }
    }

    /// Posting for a page that could not be fetched at all.
    pub fn manual_entry(url: &str, message: &str) -> Self {
        Self::from_parts(
            url,
            JobDetails::not_found(Platform::Unknown),
            Description::manual_entry(message),
        )
    }
}
