// src/lib.rs
//! Job application assistant: job posting scraping, cover letter generation
//! and optimization, and resume analysis through a text-generation backend.

pub mod analysis;
pub mod config;
pub mod cover_letter;
pub mod error;
pub mod generation;
pub mod job_scraping;
pub mod types;
pub mod utils;
pub mod web;

pub use config::ConfigManager;
pub use error::{AssistError, Result};
pub use web::start_web_server;

use analysis::ResumeAnalyzer;
use cover_letter::{CoverLetterService, Typesetter};
use generation::{GeminiClient, GenerationPipeline, TextGenerator};
use job_scraping::JobScraper;
use std::sync::Arc;

/// Every entry point wired to one configuration. Clones share the HTTP
/// clients and the generation backend.
#[derive(Clone)]
pub struct Services {
    pub config: Arc<ConfigManager>,
    pub scraper: JobScraper,
    pub cover_letters: CoverLetterService,
    pub analyzer: ResumeAnalyzer,
    pub typesetter: Typesetter,
}

impl Services {
    /// Production wiring; needs the generation API key.
    pub fn from_config(config: ConfigManager) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?;
        let backend = GeminiClient::new(api_key, &config.app.generation)?;
        Self::with_backend(config, Arc::new(backend))
    }

    pub fn with_backend(
        config: ConfigManager,
        backend: Arc<dyn TextGenerator>,
    ) -> anyhow::Result<Self> {
        let rules = config.extraction_rules()?;
        let scraper = JobScraper::new(&config.app.scraper, rules)?;
        let pipeline = GenerationPipeline::new(backend, config.app.generation.clone());
        let typesetter = Typesetter::new(config.app.typesetting.clone());

        Ok(Self {
            config: Arc::new(config),
            scraper,
            cover_letters: CoverLetterService::new(pipeline.clone()),
            analyzer: ResumeAnalyzer::new(pipeline),
            typesetter,
        })
    }
}
