// src/job_scraping/batch.rs
//! Bounded worker pool over many URLs. One task per URL, at most
//! `concurrency` in flight, results returned in input order.

use super::{JobPosting, JobScraper};
use crate::types::response::Envelope;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub url: String,
    pub result: Envelope<JobPosting>,
}

pub async fn scrape_batch(
    scraper: &JobScraper,
    urls: Vec<String>,
    concurrency: usize,
) -> Vec<BatchItem> {
    let total = urls.len();
    // No more permits than tasks.
    let permits = concurrency.clamp(1, total.max(1));
    let semaphore = Arc::new(Semaphore::new(permits));
    let mut tasks = JoinSet::new();

    info!("Scraping {} job postings (concurrency {})", total, permits);

    for (index, url) in urls.iter().cloned().enumerate() {
        let scraper = scraper.clone();
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => Envelope::from_result(scraper.scrape(&url).await),
                Err(e) => Envelope::failure(e.to_string()),
            };
            (index, BatchItem { url, result })
        });
    }

    let mut slots: Vec<Option<BatchItem>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, item)) => slots[index] = Some(item),
            Err(e) => error!("Scrape task failed: {}", e),
        }
    }

    // A panicked task leaves its slot empty; report it rather than drop the URL.
    slots
        .into_iter()
        .zip(urls)
        .map(|(slot, url)| {
            slot.unwrap_or_else(|| BatchItem {
                url,
                result: Envelope::failure("Scrape task aborted".to_string()),
            })
        })
        .collect()
}
