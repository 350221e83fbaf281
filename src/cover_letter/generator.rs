// src/cover_letter/generator.rs
use super::document::{render_letter, Recipient, Typesetter};
use super::profile::ApplicantProfile;
use crate::error::Result;
use crate::generation::{prompts, GenerationPipeline, GenerationRequest};
use crate::job_scraping::fetcher::validate_url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// What the optimized letter is aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterTarget {
    pub position: String,
    #[serde(flatten)]
    pub recipient: Recipient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedLetter {
    pub text: String,
    pub tex: String,
    pub pdf_path: Option<PathBuf>,
}

#[derive(Clone)]
pub struct CoverLetterService {
    pipeline: GenerationPipeline,
}

impl CoverLetterService {
    pub fn new(pipeline: GenerationPipeline) -> Self {
        Self { pipeline }
    }

    pub async fn generate_cover_letter(&self, job_link: &str) -> Result<String> {
        let link = validate_url(job_link)?;
        info!("Generating cover letter for {}", link);

        let request = GenerationRequest::new(prompts::COVER_LETTER).var("job_link", link.as_str());
        let letter = self.pipeline.generate_text(&request).await?;
        Ok(letter.trim().to_string())
    }

    pub async fn optimize_cover_letter(
        &self,
        cover_letter: &str,
        position: &str,
        company: &str,
    ) -> Result<String> {
        info!("Optimizing cover letter for {} at {}", position, company);

        let request = GenerationRequest::new(prompts::OPTIMIZE_COVER_LETTER)
            .var("position", position)
            .var("company", company)
            .var("cover_letter", cover_letter.trim());
        let letter = self.pipeline.generate_text(&request).await?;
        Ok(letter.trim().to_string())
    }

    /// Optimize an existing letter and lay it out in the LaTeX template;
    /// with a typesetter, also compile it.
    pub async fn compose(
        &self,
        original: &str,
        target: &LetterTarget,
        profile: &ApplicantProfile,
        template: &str,
        typesetter: Option<&Typesetter>,
    ) -> Result<ComposedLetter> {
        let text = self
            .optimize_cover_letter(original, &target.position, &target.recipient.company_name)
            .await?;
        let tex = render_letter(template, profile, &target.recipient, &text);

        let pdf_path = match typesetter {
            Some(typesetter) => Some(typesetter.compile(&tex, "coverletter").await?),
            None => None,
        };

        Ok(ComposedLetter {
            text,
            tex,
            pdf_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssistError;
    use crate::generation::pipeline::testing::{pipeline, FakeGenerator};

    fn target() -> LetterTarget {
        LetterTarget {
            position: "Junior Software Engineer".to_string(),
            recipient: Recipient {
                company_name: "UBS".to_string(),
                address1: "Bahnhofstrasse 45".to_string(),
                address2: "8001 Zurich, Switzerland".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_generate_cover_letter_trims_output() {
        let backend = FakeGenerator::replying("\n  Dear Hiring Manager,\n\nHello.  \n");
        let service = CoverLetterService::new(pipeline(backend.clone()));

        let letter = service
            .generate_cover_letter("https://www.linkedin.com/jobs/view/4169523845/")
            .await
            .unwrap();

        assert_eq!(letter, "Dear Hiring Manager,\n\nHello.");
        assert!(backend
            .last_prompt()
            .contains("https://www.linkedin.com/jobs/view/4169523845/"));
    }

    #[tokio::test]
    async fn test_generate_cover_letter_rejects_bad_link() {
        let backend = FakeGenerator::replying("unused");
        let service = CoverLetterService::new(pipeline(backend.clone()));

        assert!(matches!(
            service.generate_cover_letter("linkedin job 123").await,
            Err(AssistError::InvalidUrl)
        ));
        assert!(backend.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_optimize_uses_position_and_company() {
        let backend = FakeGenerator::replying("Better letter");
        let service = CoverLetterService::new(pipeline(backend.clone()));

        let letter = service
            .optimize_cover_letter("  my draft  ", "Data Engineer", "Globex")
            .await
            .unwrap();

        assert_eq!(letter, "Better letter");
        let prompt = backend.last_prompt();
        assert!(prompt.contains("a Data Engineer position at Globex"));
        assert!(prompt.contains("\"my draft\""));
    }

    #[tokio::test]
    async fn test_optimize_empty_response() {
        let service = CoverLetterService::new(pipeline(FakeGenerator::replying("")));
        assert!(matches!(
            service.optimize_cover_letter("draft", "Dev", "Co").await,
            Err(AssistError::EmptyGeneration)
        ));
    }

    #[tokio::test]
    async fn test_compose_without_typesetter() {
        let backend = FakeGenerator::replying(
            "Dear UBS,\n\nI build reliable systems.\n\nSincerely,\n\nAda Lovelace",
        );
        let service = CoverLetterService::new(pipeline(backend));
        let profile = ApplicantProfile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            website_url: String::new(),
            email: "ada@example.com".to_string(),
            phone_number: String::new(),
        };

        let composed = service
            .compose(
                "draft",
                &target(),
                &profile,
                "#companyName\n\\vspace{0.5cm}\n",
                None,
            )
            .await
            .unwrap();

        assert_eq!(
            composed.tex,
            "UBS\n\\lettercontent{I build reliable systems.}\n\\vspace{0.5cm}\n"
        );
        assert!(composed.pdf_path.is_none());
    }

    #[tokio::test]
    async fn test_compose_surfaces_typesetting_failure() {
        let dir = tempfile::tempdir().unwrap();
        let typesetter = Typesetter::new(crate::config::TypesettingConfig {
            command: "false".to_string(),
            args: Vec::new(),
            template_path: PathBuf::from("unused"),
            output_dir: dir.path().to_path_buf(),
        });
        let service = CoverLetterService::new(pipeline(FakeGenerator::replying("A\n\nB\n\nC")));
        let profile = ApplicantProfile {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            website_url: String::new(),
            email: "a@b.c".to_string(),
            phone_number: String::new(),
        };

        let result = service
            .compose("draft", &target(), &profile, "x\n", Some(&typesetter))
            .await;
        assert!(matches!(result, Err(AssistError::Typesetting(_))));
    }
}
