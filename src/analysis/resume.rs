// src/analysis/resume.rs
use crate::error::{AssistError, Result};
use crate::utils::get_file_extension;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Text,
}

impl ResumeFormat {
    /// Decided from the file name alone; content is never inspected.
    pub fn from_filename(filename: &str) -> Result<Self> {
        match get_file_extension(filename).as_deref() {
            Some("pdf") => Ok(ResumeFormat::Pdf),
            Some("txt") => Ok(ResumeFormat::Text),
            _ => {
                warn!("Rejected resume upload with unsupported name: {}", filename);
                Err(AssistError::UnsupportedFormat)
            }
        }
    }
}

/// An uploaded resume whose format has already been accepted.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub format: ResumeFormat,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(format: ResumeFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// Plain text of the resume. PDF extraction is CPU-bound, so it runs on
    /// the blocking pool.
    pub async fn text(self) -> Result<String> {
        let text = match self.format {
            ResumeFormat::Text => String::from_utf8(self.bytes).map_err(|_| AssistError::ResumeEncoding)?,
            ResumeFormat::Pdf => tokio::task::spawn_blocking(move || extract_pdf_text(&self.bytes))
                .await
                .map_err(|e| AssistError::PdfRead(e.to_string()))??,
        };

        info!("Document text extracted ({} chars)", text.len());
        Ok(text)
    }
}

pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed documents instead of erroring.
    let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| AssistError::PdfRead("malformed PDF document".to_string()))?;

    extracted.map_err(|e| AssistError::PdfRead(e.to_string()))
}

/// Job links arrive as a JSON array of URL strings.
pub fn parse_job_links(json: &str) -> Result<Vec<String>> {
    let links: Vec<String> = serde_json::from_str(json).map_err(|e| {
        warn!("Invalid job links payload: {}", e);
        AssistError::InvalidJobLinks
    })?;

    Ok(links
        .into_iter()
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
        .collect())
}
