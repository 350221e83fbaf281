// src/web/types.rs
use rocket::form::FromForm;
use rocket::fs::TempFile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub job_url: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchScrapeRequest {
    pub job_urls: Vec<String>,
    pub concurrency: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub job_link: String,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeLetterRequest {
    pub cover_letter: String,
    pub position: String,
    pub company: String,
}

#[derive(FromForm)]
pub struct ResumeAnalysisForm<'f> {
    pub resume: TempFile<'f>,
    pub job_links: String,
}

#[derive(FromForm)]
pub struct ResumeReviewForm<'f> {
    pub resume: TempFile<'f>,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct HealthPayload {
    pub status: String,
    pub version: String,
    pub environment: String,
}
