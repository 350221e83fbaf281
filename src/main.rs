use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use job_assistant::analysis::{ResumeFile, ResumeFormat};
use job_assistant::cover_letter::{ApplicantProfile, LetterTarget, Recipient};
use job_assistant::job_scraping::{scrape_batch, JobScraper};
use job_assistant::types::response::{
    AnalysisPayload, BatchPayload, CompiledLetterPayload, CoverLetterPayload, Envelope,
    ReviewPayload,
};
use job_assistant::utils::read_file_safe;
use job_assistant::{start_web_server, AssistError, ConfigManager, Services};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "coverforge")]
#[command(about = "Job posting scraper, cover letter writer and resume analyzer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve,
    /// Scrape a single job posting
    Scrape {
        url: String,
    },
    /// Scrape several job postings concurrently
    ScrapeBatch {
        #[arg(required = true)]
        urls: Vec<String>,
        #[arg(short, long)]
        concurrency: Option<usize>,
    },
    /// Generate a cover letter for a job posting link
    CoverLetter {
        job_link: String,
    },
    /// Optimize an existing cover letter, optionally typesetting it
    OptimizeLetter {
        /// Letter to optimize (.pdf or .txt)
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        position: String,
        #[arg(long)]
        company: String,
        #[arg(long, default_value = "")]
        address1: String,
        #[arg(long, default_value = "")]
        address2: String,
        /// Render into the LaTeX template and compile to PDF
        #[arg(long)]
        compile: bool,
    },
    /// Match a resume against job postings
    Analyze {
        #[arg(short, long)]
        resume: PathBuf,
        /// JSON array of job posting links
        #[arg(short, long)]
        job_links: String,
    },
    /// Review a resume against a job description
    Review {
        #[arg(short, long)]
        resume: PathBuf,
        /// File holding the job description text
        #[arg(short, long)]
        job_description: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("job_assistant=info,coverforge=info,rocket=warn")
        }))
        .init();

    let cli = Cli::parse();
    let config = ConfigManager::load()?;

    let succeeded = match cli.command {
        Commands::Serve => {
            let services = Services::from_config(config)?;
            start_web_server(services).await?;
            true
        }
        Commands::Scrape { url } => {
            let scraper = scraper(&config)?;
            print_envelope(&Envelope::from_result(scraper.scrape(&url).await))?
        }
        Commands::ScrapeBatch { urls, concurrency } => {
            let scraper = scraper(&config)?;
            let concurrency = concurrency.unwrap_or(config.app.scraper.batch_concurrency);
            info!("Scraping {} postings, {} at a time", urls.len(), concurrency);

            let results = scrape_batch(&scraper, urls, concurrency).await;
            print_envelope(&Envelope::success(BatchPayload { results }))?
        }
        Commands::CoverLetter { job_link } => {
            let services = Services::from_config(config)?;
            let result = services
                .cover_letters
                .generate_cover_letter(&job_link)
                .await
                .map(|cover_letter| CoverLetterPayload { cover_letter });
            print_envelope(&Envelope::from_result(result))?
        }
        Commands::OptimizeLetter {
            input,
            position,
            company,
            address1,
            address2,
            compile,
        } => {
            let services = Services::from_config(config)?;
            let target = LetterTarget {
                position,
                recipient: Recipient {
                    company_name: company,
                    address1,
                    address2,
                },
            };
            let result = optimize_letter(&services, &input, &target, compile).await?;
            print_envelope(&Envelope::from_result(result))?
        }
        Commands::Analyze { resume, job_links } => {
            let services = Services::from_config(config)?;
            let result = match load_document(&resume).await? {
                Ok(file) => services
                    .analyzer
                    .analyze_resume(file, &job_links)
                    .await
                    .map(|results| AnalysisPayload { results }),
                Err(e) => Err(e),
            };
            print_envelope(&Envelope::from_result(result))?
        }
        Commands::Review {
            resume,
            job_description,
        } => {
            let services = Services::from_config(config)?;
            let description = tokio::fs::read_to_string(&job_description)
                .await
                .with_context(|| {
                    format!("Failed to read job description: {}", job_description.display())
                })?;
            let result = match load_document(&resume).await? {
                Ok(file) => services
                    .analyzer
                    .review_resume(file, &description)
                    .await
                    .map(|review| ReviewPayload { review }),
                Err(e) => Err(e),
            };
            print_envelope(&Envelope::from_result(result))?
        }
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

/// Scraping needs no generation backend, so no API key either.
fn scraper(config: &ConfigManager) -> Result<JobScraper> {
    Ok(JobScraper::new(
        &config.app.scraper,
        config.extraction_rules()?,
    )?)
}

/// A `.pdf` or `.txt` input, resume or cover letter alike.
///
/// Outer error: the file could not be read. Inner error: it was read but is
/// not something we accept, which belongs in the envelope.
async fn load_document(path: &Path) -> Result<Result<ResumeFile, AssistError>> {
    let name = path.to_string_lossy();
    let format = match ResumeFormat::from_filename(&name) {
        Ok(format) => format,
        Err(e) => return Ok(Err(e)),
    };
    let bytes = read_file_safe(path).await?;
    Ok(Ok(ResumeFile::new(format, bytes)))
}

async fn optimize_letter(
    services: &Services,
    input: &Path,
    target: &LetterTarget,
    compile: bool,
) -> Result<Result<CompiledLetterPayload, AssistError>> {
    let file = match load_document(input).await? {
        Ok(file) => file,
        Err(e) => return Ok(Err(e)),
    };
    let original = match file.text().await {
        Ok(text) => text,
        Err(e) => return Ok(Err(e)),
    };

    if !compile {
        let result = services
            .cover_letters
            .optimize_cover_letter(&original, &target.position, &target.recipient.company_name)
            .await
            .map(|cover_letter| CompiledLetterPayload {
                cover_letter,
                document_path: None,
            });
        return Ok(result);
    }

    let app = &services.config.app;
    let profile = ApplicantProfile::load(&app.profile_path).await?;
    let template = tokio::fs::read_to_string(&app.typesetting.template_path)
        .await
        .with_context(|| {
            format!(
                "Failed to read letter template: {}",
                app.typesetting.template_path.display()
            )
        })?;

    let result = services
        .cover_letters
        .compose(&original, target, &profile, &template, Some(&services.typesetter))
        .await
        .map(|letter| CompiledLetterPayload {
            cover_letter: letter.text,
            document_path: letter.pdf_path.map(|p| p.display().to_string()),
        });
    Ok(result)
}

fn print_envelope<T: Serialize>(envelope: &Envelope<T>) -> Result<bool> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(envelope.success)
}
