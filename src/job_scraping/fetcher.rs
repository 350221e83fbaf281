// src/job_scraping/fetcher.rs
use crate::config::ScraperConfig;
use crate::error::{AssistError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

/// A page that answered. Transport failures and other non-2xx statuses are
/// `AssistError::Fetch` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedPage {
    Html(String),
    /// HTTP 403. Job boards block scrapers routinely.
    AccessDenied,
}

#[derive(Debug, Clone)]
pub struct HtmlFetcher {
    client: Client,
}

impl HtmlFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(browser_headers(config)?)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AssistError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Single GET, no retry.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let parsed = validate_url(url)?;
        info!("Fetching job post: {}", parsed);

        let response = match self.client.get(parsed).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Request error for {}: {}", url, e);
                return Err(AssistError::Fetch(e.to_string()));
            }
        };

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            warn!("Access denied (403) for {}", url);
            return Ok(FetchedPage::AccessDenied);
        }

        if !status.is_success() {
            warn!("HTTP error {} for {}", status, url);
            return Err(AssistError::Fetch(format!("HTTP error: {}", status)));
        }

        let html = response.text().await.map_err(|e| {
            error!("Failed to read response body for {}: {}", url, e);
            AssistError::Fetch(e.to_string())
        })?;
        Ok(FetchedPage::Html(html))
    }
}

/// A URL is usable when it parses with a scheme of its own.
pub fn validate_url(url: &str) -> Result<Url> {
    if url.trim().is_empty() {
        return Err(AssistError::InvalidUrl);
    }
    Url::parse(url.trim()).map_err(|_| AssistError::InvalidUrl)
}

fn browser_headers(config: &ScraperConfig) -> Result<HeaderMap> {
    let pairs = [
        ("user-agent", config.user_agent.as_str()),
        ("accept", config.accept.as_str()),
        ("accept-language", config.accept_language.as_str()),
        ("connection", "keep-alive"),
        ("upgrade-insecure-requests", "1"),
    ];

    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let value = HeaderValue::from_str(value)
            .map_err(|e| AssistError::Config(format!("Invalid {} header: {}", name, e)))?;
        headers.insert(HeaderName::from_static(name), value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> HtmlFetcher {
        HtmlFetcher::new(&ScraperConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_scheme_is_invalid() {
        let fetcher = fetcher();
        for url in ["www.linkedin.com/jobs/view/1", "", "   ", "/jobs/1"] {
            assert!(matches!(
                fetcher.fetch(url).await,
                Err(AssistError::InvalidUrl)
            ));
        }
    }

    #[tokio::test]
    async fn test_forbidden_is_access_denied() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jobs/view/1")
            .with_status(403)
            .create_async()
            .await;

        let page = fetcher()
            .fetch(&format!("{}/jobs/view/1", server.url()))
            .await
            .unwrap();
        assert_eq!(page, FetchedPage::AccessDenied);
    }

    #[tokio::test]
    async fn test_server_error_is_fetch_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/job")
            .with_status(503)
            .create_async()
            .await;

        let result = fetcher().fetch(&format!("{}/job", server.url())).await;
        match result {
            Err(AssistError::Fetch(reason)) => assert!(reason.contains("503")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sends_browser_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/job")
            .match_header("accept-language", "en-US,en;q=0.5")
            .match_header("upgrade-insecure-requests", "1")
            .with_status(200)
            .with_body("<h1>Hello</h1>")
            .create_async()
            .await;

        let page = fetcher()
            .fetch(&format!("{}/job", server.url()))
            .await
            .unwrap();
        assert_eq!(page, FetchedPage::Html("<h1>Hello</h1>".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused_is_fetch_error() {
        let result = fetcher().fetch("http://127.0.0.1:1/job").await;
        assert!(matches!(result, Err(AssistError::Fetch(_))));
    }
}
