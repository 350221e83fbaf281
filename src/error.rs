// src/error.rs
//! Error taxonomy shared by every entry point.
//!
//! The `Display` text of each variant is what callers see in the
//! `{success: false, error}` envelope, so it is written for a person.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssistError>;

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("Invalid URL provided")]
    InvalidUrl,

    /// Network, timeout or non-2xx failure. `JobScraper` turns this into a
    /// manual-entry posting, so only the raw fetcher returns it.
    #[error("Unable to fetch job posting: {0}")]
    Fetch(String),

    #[error("Unsupported file format. Please upload a PDF or TXT file.")]
    UnsupportedFormat,

    #[error("Error reading PDF: {0}")]
    PdfRead(String),

    #[error("Failed to read uploaded file: {0}")]
    Upload(String),

    #[error("Text file is not valid UTF-8")]
    ResumeEncoding,

    #[error("Invalid job links format")]
    InvalidJobLinks,

    #[error("No response from AI model")]
    EmptyGeneration,

    #[error("Invalid response format")]
    MalformedResponse,

    #[error("Invalid response structure")]
    InvalidStructure,

    #[error("Generation backend error: {0}")]
    Backend(String),

    #[error("Document compilation failed: {0}")]
    Typesetting(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AssistError {
    /// Stable machine-readable code, used in logs and HTTP catchers.
    pub fn code(&self) -> &'static str {
        match self {
            AssistError::InvalidUrl => "INVALID_URL",
            AssistError::Fetch(_) => "FETCH_ERROR",
            AssistError::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            AssistError::PdfRead(_) => "PDF_READ_ERROR",
            AssistError::Upload(_) => "UPLOAD_ERROR",
            AssistError::ResumeEncoding => "RESUME_ENCODING",
            AssistError::InvalidJobLinks => "INVALID_JOB_LINKS",
            AssistError::EmptyGeneration => "EMPTY_GENERATION",
            AssistError::MalformedResponse => "MALFORMED_RESPONSE",
            AssistError::InvalidStructure => "INVALID_STRUCTURE",
            AssistError::Backend(_) => "BACKEND_ERROR",
            AssistError::Typesetting(_) => "TYPESETTING_ERROR",
            AssistError::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<reqwest::Error> for AssistError {
    fn from(e: reqwest::Error) -> Self {
        AssistError::Backend(e.to_string())
    }
}
