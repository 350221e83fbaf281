// src/web/handlers/mod.rs
pub mod cover_letter_handlers;
pub mod job_handlers;
pub mod resume_handlers;
pub mod system_handlers;

pub use cover_letter_handlers::*;
pub use job_handlers::*;
pub use resume_handlers::*;
pub use system_handlers::*;

use crate::error::{AssistError, Result};
use crate::types::response::Envelope;
use rocket::http::Status;
use rocket::serde::json::Json;
use tracing::warn;

pub type ApiResponse<T> = (Status, Json<Envelope<T>>);

/// Input problems are the caller's fault, generation problems are upstream's.
pub fn status_for(error: &AssistError) -> Status {
    match error {
        AssistError::InvalidUrl
        | AssistError::UnsupportedFormat
        | AssistError::PdfRead(_)
        | AssistError::ResumeEncoding
        | AssistError::InvalidJobLinks => Status::BadRequest,
        AssistError::Fetch(_)
        | AssistError::EmptyGeneration
        | AssistError::MalformedResponse
        | AssistError::InvalidStructure
        | AssistError::Backend(_) => Status::BadGateway,
        AssistError::Upload(_) | AssistError::Typesetting(_) | AssistError::Config(_) => {
            Status::InternalServerError
        }
    }
}

pub fn respond<T>(result: Result<T>) -> ApiResponse<T> {
    match result {
        Ok(payload) => (Status::Ok, Json(Envelope::success(payload))),
        Err(e) => {
            warn!("Request failed ({}): {}", e.code(), e);
            (status_for(&e), Json(Envelope::failure(e.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for() {
        assert_eq!(status_for(&AssistError::InvalidUrl), Status::BadRequest);
        assert_eq!(status_for(&AssistError::EmptyGeneration), Status::BadGateway);
        assert_eq!(
            status_for(&AssistError::Typesetting("x".to_string())),
            Status::InternalServerError
        );
        assert_eq!(
            status_for(&AssistError::Upload("x".to_string())),
            Status::InternalServerError
        );
    }
}
