// src/job_scraping/rules.rs
//! Selector rule table for job pages.
//!
//! Every field is resolved the same way: platform selectors first, in order,
//! then generic selectors, in order. The first element whose cleaned text is
//! non-empty wins. Nothing here is platform-specific code; it is all data, and
//! `config.yaml` can replace the whole table.

use super::types::Platform;
use scraper::Selector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPattern {
    pub platform: Platform,
    /// Substring searched for in the full URL.
    pub url_contains: String,
}

/// Ordered selectors for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRule {
    pub platform: Platform,
    pub selectors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRules {
    #[serde(default)]
    pub platforms: Vec<ExtractionRule>,
    #[serde(default)]
    pub generic: Vec<String>,
}

impl FieldRules {
    /// Selector lists in the order they must be tried for `platform`.
    pub fn cascade(&self, platform: Platform) -> Vec<&[String]> {
        let mut tiers: Vec<&[String]> = self
            .platforms
            .iter()
            .filter(|rule| rule.platform == platform)
            .map(|rule| rule.selectors.as_slice())
            .collect();
        tiers.push(self.generic.as_slice());
        tiers
    }

    fn all_selectors(&self) -> impl Iterator<Item = &String> {
        self.platforms
            .iter()
            .flat_map(|rule| rule.selectors.iter())
            .chain(self.generic.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub platforms: Vec<PlatformPattern>,
    pub title: FieldRules,
    pub company: FieldRules,
    /// Tried across all platforms.
    pub description: Vec<String>,
    /// Lower-case phrases that mark a block as the job description.
    pub description_phrases: Vec<String>,
    /// Elements scanned when searching by phrase.
    pub description_blocks: String,
}

impl RuleTable {
    /// Platform by URL substring; first listed pattern wins.
    pub fn classify(&self, url: &str) -> Platform {
        self.platforms
            .iter()
            .find(|pattern| url.contains(&pattern.url_contains))
            .map(|pattern| pattern.platform)
            .unwrap_or(Platform::Other)
    }

    /// Parse every selector once so a bad table fails at startup, not per request.
    pub fn validate(&self) -> Result<(), String> {
        let selectors = self
            .title
            .all_selectors()
            .chain(self.company.all_selectors())
            .chain(self.description.iter())
            .chain(std::iter::once(&self.description_blocks));

        for selector in selectors {
            Selector::parse(selector)
                .map_err(|e| format!("invalid selector '{}': {}", selector, e))?;
        }
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            platforms: vec![
                PlatformPattern {
                    platform: Platform::Indeed,
                    url_contains: "indeed.com".to_string(),
                },
                PlatformPattern {
                    platform: Platform::LinkedIn,
                    url_contains: "linkedin.com".to_string(),
                },
            ],
            title: FieldRules {
                platforms: vec![
                    ExtractionRule {
                        platform: Platform::Indeed,
                        selectors: strings(&[
                            "h1.jobsearch-JobInfoHeader-title",
                            "div.jobsearch-JobInfoHeader-title-container h1",
                            "h1.icl-u-xs-mb--xs",
                        ]),
                    },
                    ExtractionRule {
                        platform: Platform::LinkedIn,
                        selectors: strings(&[
                            "h1.top-card-layout__title",
                            "h1.job-details-jobs-unified-top-card__job-title",
                            "h1.topcard__title",
                        ]),
                    },
                ],
                generic: strings(&["h1", "h1.job-title", "div.job-title", "title"]),
            },
            company: FieldRules {
                platforms: vec![
                    ExtractionRule {
                        platform: Platform::Indeed,
                        selectors: strings(&[
                            "div[data-company-name=\"true\"]",
                            "div.jobsearch-CompanyInfoContainer span.jobsearch-CompanyInfoWithoutHeaderImage",
                            "div.jobsearch-InlineCompanyRating > div:first-child",
                        ]),
                    },
                    ExtractionRule {
                        platform: Platform::LinkedIn,
                        selectors: strings(&[
                            "a.company-name-link",
                            "a[data-tracking-control-name=\"public_jobs_topcard-org-name\"]",
                            "span.topcard__flavor",
                            "a.sub-nav-cta__optional-url",
                        ]),
                    },
                ],
                generic: strings(&[
                    "div[class*=\"company\"]",
                    "span[class*=\"company\"]",
                    "div[class*=\"employer\"]",
                    "span[class*=\"employer\"]",
                ]),
            },
            description: strings(&[
                "div.job-description",
                "div[data-automation='jobDescription']",
                "#job-description",
                ".description__text",
                "div.description",
                "div[class*='jobsearch-jobDescriptionText']",
                "div[class*='show-more-less-html']",
                "div[class*='job-description']",
            ]),
            description_phrases: strings(&["job description", "about this role", "about the role"]),
            description_blocks: "div".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_platform() {
        let rules = RuleTable::default();
        assert_eq!(
            rules.classify("https://www.indeed.com/viewjob?jk=1"),
            Platform::Indeed
        );
        assert_eq!(
            rules.classify("https://www.linkedin.com/jobs/view/123"),
            Platform::LinkedIn
        );
        assert_eq!(
            rules.classify("https://careers.example.org/42"),
            Platform::Other
        );
    }

    #[test]
    fn test_cascade_puts_platform_before_generic() {
        let rules = RuleTable::default();
        let tiers = rules.title.cascade(Platform::LinkedIn);
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0][0], "h1.top-card-layout__title");
        assert_eq!(tiers[1][0], "h1");

        let generic_only = rules.title.cascade(Platform::Other);
        assert_eq!(generic_only.len(), 1);
        assert_eq!(generic_only[0][0], "h1");
    }

    #[test]
    fn test_default_table_is_valid() {
        assert!(RuleTable::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_selector() {
        let mut rules = RuleTable::default();
        rules.company.generic.push("div[".to_string());
        let err = rules.validate().unwrap_err();
        assert!(err.contains("div["));
    }

    #[test]
    fn test_rule_table_from_yaml() {
        let yaml = r#"
platforms:
  - platform: LinkedIn
    url_contains: linkedin.com
title:
  platforms:
    - platform: LinkedIn
      selectors: ["h1.custom"]
  generic: ["h1"]
company:
  generic: ["span.org"]
description: ["div.desc"]
description_phrases: ["about us"]
description_blocks: "section"
"#;
        let rules: RuleTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rules.title.cascade(Platform::LinkedIn)[0][0], "h1.custom");
        assert!(rules.company.platforms.is_empty());
        assert_eq!(rules.classify("https://indeed.com/x"), Platform::Other);
    }
}
