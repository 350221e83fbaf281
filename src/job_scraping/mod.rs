// src/job_scraping/mod.rs
//! Job posting scraping: fetch a page, then run the selector cascade over it.

pub mod batch;
pub mod extractor;
pub mod fetcher;
pub mod rules;
pub mod types;

pub use batch::{scrape_batch, BatchItem};
pub use extractor::JobExtractor;
pub use fetcher::{FetchedPage, HtmlFetcher};
pub use rules::RuleTable;
pub use types::{JobPosting, Platform};

use crate::config::ScraperConfig;
use crate::error::{AssistError, Result};
use scraper::Html;
use std::sync::Arc;
use tracing::{info, warn};
use types::{MSG_ACCESS_DENIED, MSG_FETCH_FAILED};

/// Fetcher and extractor together. Cheap to clone; clones share the HTTP
/// connection pool and the rule table.
#[derive(Debug, Clone)]
pub struct JobScraper {
    fetcher: HtmlFetcher,
    extractor: JobExtractor,
}

impl JobScraper {
    pub fn new(config: &ScraperConfig, rules: Arc<RuleTable>) -> Result<Self> {
        Ok(Self {
            fetcher: HtmlFetcher::new(config)?,
            extractor: JobExtractor::new(rules),
        })
    }

    /// Scrape one posting. The only error is an unusable URL; every other
    /// failure comes back as a posting flagged for manual entry.
    pub async fn scrape(&self, url: &str) -> Result<JobPosting> {
        let posting = match self.fetcher.fetch(url).await {
            Ok(FetchedPage::Html(html)) => {
                let document = Html::parse_document(&html);
                self.extractor.extract(&document, url)
            }
            Ok(FetchedPage::AccessDenied) => JobPosting::manual_entry(url, MSG_ACCESS_DENIED),
            Err(AssistError::Fetch(reason)) => {
                warn!("Falling back to manual entry for {}: {}", url, reason);
                JobPosting::manual_entry(url, MSG_FETCH_FAILED)
            }
            Err(e) => return Err(e),
        };

        info!(
            "Scraped {} posting: {} at {} (manual entry: {})",
            posting.platform, posting.title, posting.company_name, posting.requires_manual_entry
        );
        Ok(posting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraper() -> JobScraper {
        JobScraper::new(&ScraperConfig::default(), Arc::new(RuleTable::default())).unwrap()
    }

    #[tokio::test]
    async fn test_scrape_full_page() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/careers/42")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(
                r#"<html><head><title>Jobs</title></head><body>
                    <h1 class="job-title">Site Reliability Engineer</h1>
                    <div class="company-name">Umbrella</div>
                    <div class="job-description">Keep the lights on.</div>
                </body></html>"#,
            )
            .create_async()
            .await;

        let url = format!("{}/careers/42", server.url());
        let posting = scraper().scrape(&url).await.unwrap();

        assert_eq!(posting.url, url);
        assert_eq!(posting.platform, Platform::Other);
        assert_eq!(posting.title, "Site Reliability Engineer");
        assert_eq!(posting.company_name, "Umbrella");
        assert_eq!(posting.description, "Keep the lights on.");
        assert!(!posting.requires_manual_entry);
    }

    #[tokio::test]
    async fn test_scrape_forbidden_requires_manual_entry() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/job")
            .with_status(403)
            .create_async()
            .await;

        let posting = scraper()
            .scrape(&format!("{}/job", server.url()))
            .await
            .unwrap();

        assert!(posting.requires_manual_entry);
        assert_eq!(posting.platform, Platform::Unknown);
        assert_eq!(posting.description, MSG_ACCESS_DENIED);
        assert_eq!(posting.title, "Position Not Found");
    }

    #[tokio::test]
    async fn test_scrape_not_found_requires_manual_entry() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/gone")
            .with_status(404)
            .create_async()
            .await;

        let posting = scraper()
            .scrape(&format!("{}/gone", server.url()))
            .await
            .unwrap();

        assert!(posting.requires_manual_entry);
        assert_eq!(posting.description, MSG_FETCH_FAILED);
    }

    #[tokio::test]
    async fn test_scrape_invalid_url() {
        assert!(matches!(
            scraper().scrape("not a url").await,
            Err(AssistError::InvalidUrl)
        ));
    }

    #[test]
    fn test_posting_serializes_with_envelope_field_names() {
        let posting = JobPosting::manual_entry("https://x.test", MSG_FETCH_FAILED);
        let value = serde_json::to_value(&posting).unwrap();
        assert_eq!(value["job_title"], "Position Not Found");
        assert_eq!(value["company_name"], "Company Not Found");
        assert_eq!(value["platform"], "Unknown");
        assert_eq!(value["requires_manual_entry"], true);
    }
}
