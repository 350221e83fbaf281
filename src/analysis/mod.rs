// src/analysis/mod.rs
//! Resume analysis against job links, and resume review against a job
//! description.

pub mod assembler;
pub mod resume;
pub mod review;

pub use assembler::{assemble, JobMatch, FALLBACK_RECOMMENDATIONS};
pub use resume::{parse_job_links, ResumeFile, ResumeFormat};
pub use review::{ResumeReview, SectionSuggestions};

use crate::error::Result;
use crate::generation::{prompts, GenerationPipeline, GenerationRequest};
use tracing::info;

#[derive(Clone)]
pub struct ResumeAnalyzer {
    pipeline: GenerationPipeline,
}

impl ResumeAnalyzer {
    pub fn new(pipeline: GenerationPipeline) -> Self {
        Self { pipeline }
    }

    /// Match a resume against every job link. `job_links` is a JSON array of
    /// URLs, validated after the resume has been read.
    pub async fn analyze_resume(&self, resume: ResumeFile, job_links: &str) -> Result<Vec<JobMatch>> {
        let resume_content = resume.text().await?;
        let links = parse_job_links(job_links)?;
        info!("Analyzing resume against {} job links", links.len());

        let request = GenerationRequest::new(prompts::RESUME_ANALYSIS)
            .var("resume_content", resume_content)
            .var("job_links", format_links(&links));

        let analysis = self.pipeline.generate_json(&request).await?;
        assemble(analysis)
    }

    pub async fn review_resume(&self, resume: ResumeFile, job_description: &str) -> Result<ResumeReview> {
        let resume_content = resume.text().await?;
        info!("Reviewing resume against job description");

        let request = GenerationRequest::new(prompts::RESUME_REVIEW)
            .var("resume_content", resume_content)
            .var("job_description", job_description);

        let review = self.pipeline.generate_json(&request).await?;
        ResumeReview::from_value(review)
    }
}

fn format_links(links: &[String]) -> String {
    links
        .iter()
        .map(|link| format!("- {}", link))
        .collect::<Vec<_>>()
        .join("\n")
}
