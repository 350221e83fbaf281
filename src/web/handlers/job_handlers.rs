// src/web/handlers/job_handlers.rs
use super::{respond, ApiResponse};
use crate::job_scraping::{scrape_batch, JobPosting};
use crate::types::response::BatchPayload;
use crate::web::types::{BatchScrapeRequest, ScrapeRequest};
use crate::Services;
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn scrape_job_handler(
    request: Json<ScrapeRequest>,
    services: &State<Services>,
) -> ApiResponse<JobPosting> {
    info!("Scrape requested for {}", request.job_url);
    respond(services.scraper.scrape(&request.job_url).await)
}

pub async fn scrape_jobs_handler(
    request: Json<BatchScrapeRequest>,
    services: &State<Services>,
) -> ApiResponse<BatchPayload> {
    let request = request.into_inner();
    let concurrency = request
        .concurrency
        .unwrap_or(services.config.app.scraper.batch_concurrency);

    let results = scrape_batch(&services.scraper, request.job_urls, concurrency).await;
    respond(Ok(BatchPayload { results }))
}
