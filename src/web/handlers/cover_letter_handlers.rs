// src/web/handlers/cover_letter_handlers.rs
use super::{respond, ApiResponse};
use crate::types::response::CoverLetterPayload;
use crate::web::types::{CoverLetterRequest, OptimizeLetterRequest};
use crate::Services;
use rocket::serde::json::Json;
use rocket::State;

pub async fn generate_cover_letter_handler(
    request: Json<CoverLetterRequest>,
    services: &State<Services>,
) -> ApiResponse<CoverLetterPayload> {
    let result = services
        .cover_letters
        .generate_cover_letter(&request.job_link)
        .await
        .map(|cover_letter| CoverLetterPayload { cover_letter });
    respond(result)
}

pub async fn optimize_cover_letter_handler(
    request: Json<OptimizeLetterRequest>,
    services: &State<Services>,
) -> ApiResponse<CoverLetterPayload> {
    let result = services
        .cover_letters
        .optimize_cover_letter(&request.cover_letter, &request.position, &request.company)
        .await
        .map(|cover_letter| CoverLetterPayload { cover_letter });
    respond(result)
}
