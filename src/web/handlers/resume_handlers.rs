// src/web/handlers/resume_handlers.rs
use super::{respond, ApiResponse};
use crate::analysis::{ResumeFile, ResumeFormat};
use crate::error::{AssistError, Result};
use crate::types::response::{AnalysisPayload, ReviewPayload};
use crate::web::types::{ResumeAnalysisForm, ResumeReviewForm};
use crate::Services;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::State;
use tokio::io::AsyncReadExt;
use tracing::info;

pub async fn analyze_resume_handler(
    form: Form<ResumeAnalysisForm<'_>>,
    services: &State<Services>,
) -> ApiResponse<AnalysisPayload> {
    let result = async {
        let resume = read_upload(&form.resume).await?;
        let results = services
            .analyzer
            .analyze_resume(resume, &form.job_links)
            .await?;
        Ok::<_, AssistError>(AnalysisPayload { results })
    }
    .await;
    respond(result)
}

pub async fn resume_review_handler(
    form: Form<ResumeReviewForm<'_>>,
    services: &State<Services>,
) -> ApiResponse<ReviewPayload> {
    let result = async {
        let resume = read_upload(&form.resume).await?;
        let review = services
            .analyzer
            .review_resume(resume, &form.job_description)
            .await?;
        Ok::<_, AssistError>(ReviewPayload { review })
    }
    .await;
    respond(result)
}

/// Format is decided from the uploaded file name before any content is read.
async fn read_upload(file: &TempFile<'_>) -> Result<ResumeFile> {
    let filename = file
        .raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_string())
        .unwrap_or_default();
    let format = ResumeFormat::from_filename(&filename)?;

    info!("Reading uploaded resume {} ({} bytes)", filename, file.len());

    let reader = file
        .open()
        .await
        .map_err(|e| AssistError::Upload(e.to_string()))?;
    tokio::pin!(reader);

    let mut bytes = Vec::with_capacity(file.len() as usize);
    reader
        .read_to_end(&mut bytes)
        .await
        .map_err(|e| AssistError::Upload(e.to_string()))?;

    Ok(ResumeFile::new(format, bytes))
}
