// src/job_scraping/extractor.rs
use super::rules::RuleTable;
use super::types::{
    Description, JobDetails, JobPosting, COMPANY_NOT_FOUND, MSG_NO_DESCRIPTION, TITLE_NOT_FOUND,
};
use crate::utils::clean_text;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pulls job fields out of a parsed page. Never fails: anything it cannot
/// find comes back as a sentinel value or a manual-entry description.
#[derive(Debug, Clone)]
pub struct JobExtractor {
    rules: Arc<RuleTable>,
}

impl JobExtractor {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    pub fn extract(&self, document: &Html, url: &str) -> JobPosting {
        let details = self.extract_details(document, url);
        let description = self.scrape_description(document);
        JobPosting::from_parts(url, details, description)
    }

    /// Title, company and platform for `url`.
    pub fn extract_details(&self, document: &Html, url: &str) -> JobDetails {
        let platform = self.rules.classify(url);

        let resolved = (|| -> Result<(Option<String>, Option<String>), String> {
            let title = first_match_in_tiers(document, &self.rules.title.cascade(platform))?;
            let company = first_match_in_tiers(document, &self.rules.company.cascade(platform))?;
            Ok((title, company))
        })();

        match resolved {
            Ok((title, company)) => {
                if title.is_none() {
                    debug!("No title selector matched for {}", url);
                }
                if company.is_none() {
                    debug!("No company selector matched for {}", url);
                }
                JobDetails {
                    title: title.unwrap_or_else(|| TITLE_NOT_FOUND.to_string()),
                    company_name: company.unwrap_or_else(|| COMPANY_NOT_FOUND.to_string()),
                    platform,
                }
            }
            Err(e) => {
                warn!("Error extracting job details from {}: {}", url, e);
                JobDetails::not_found(platform)
            }
        }
    }

    /// Description text, falling back to a phrase search and finally to the
    /// manual-entry message.
    pub fn scrape_description(&self, document: &Html) -> Description {
        for selector_str in &self.rules.description {
            let selector = match Selector::parse(selector_str) {
                Ok(selector) => selector,
                Err(e) => {
                    warn!("Skipping description selector '{}': {}", selector_str, e);
                    continue;
                }
            };

            if let Some(text) = first_text(document, &selector) {
                info!("Description matched selector '{}'", selector_str);
                return Description {
                    text,
                    requires_manual_entry: false,
                };
            }
        }

        if let Some(text) = self.find_description_by_phrase(document) {
            info!("Description located by phrase search");
            return Description {
                text,
                requires_manual_entry: false,
            };
        }

        warn!("No job description found, manual entry required");
        Description::manual_entry(MSG_NO_DESCRIPTION)
    }

    fn find_description_by_phrase(&self, document: &Html) -> Option<String> {
        let blocks = match Selector::parse(&self.rules.description_blocks) {
            Ok(selector) => selector,
            Err(e) => {
                warn!(
                    "Invalid description block selector '{}': {}",
                    self.rules.description_blocks, e
                );
                return None;
            }
        };

        document.select(&blocks).find_map(|element| {
            let text = element_text(&element);
            let lowered = text.to_lowercase();
            self.rules
                .description_phrases
                .iter()
                .any(|phrase| lowered.contains(&phrase.to_lowercase()))
                .then_some(text)
        })
    }
}

/// First non-empty match across tiers, in order. A selector that does not
/// parse aborts the whole lookup.
fn first_match_in_tiers(document: &Html, tiers: &[&[String]]) -> Result<Option<String>, String> {
    for tier in tiers {
        if let Some(text) = first_match(document, tier)? {
            return Ok(Some(text));
        }
    }
    Ok(None)
}

fn first_match(document: &Html, selectors: &[String]) -> Result<Option<String>, String> {
    for selector_str in selectors {
        let selector = Selector::parse(selector_str)
            .map_err(|e| format!("invalid selector '{}': {}", selector_str, e))?;

        if let Some(text) = first_text(document, &selector) {
            debug!("Selector '{}' matched", selector_str);
            return Ok(Some(text));
        }
    }
    Ok(None)
}

/// Cleaned text of the first element matching `selector`, if non-empty.
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|element| element_text(&element))
        .filter(|text| !text.is_empty())
}

fn element_text(element: &ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}
