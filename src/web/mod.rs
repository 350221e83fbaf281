// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::job_scraping::JobPosting;
use crate::types::response::{
    AnalysisPayload, BatchPayload, CoverLetterPayload, Envelope, ReviewPayload,
};
use crate::Services;
use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use std::net::IpAddr;
use tracing::info;

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/scrape-job", data = "<request>")]
pub async fn scrape_job(
    request: Json<ScrapeRequest>,
    services: &State<Services>,
) -> ApiResponse<JobPosting> {
    handlers::scrape_job_handler(request, services).await
}

#[post("/scrape-jobs", data = "<request>")]
pub async fn scrape_jobs(
    request: Json<BatchScrapeRequest>,
    services: &State<Services>,
) -> ApiResponse<BatchPayload> {
    handlers::scrape_jobs_handler(request, services).await
}

#[post("/generate-cover-letter", data = "<request>")]
pub async fn generate_cover_letter(
    request: Json<CoverLetterRequest>,
    services: &State<Services>,
) -> ApiResponse<CoverLetterPayload> {
    handlers::generate_cover_letter_handler(request, services).await
}

#[post("/optimize-cover-letter", data = "<request>")]
pub async fn optimize_cover_letter(
    request: Json<OptimizeLetterRequest>,
    services: &State<Services>,
) -> ApiResponse<CoverLetterPayload> {
    handlers::optimize_cover_letter_handler(request, services).await
}

#[post("/analyze-resume", data = "<form>")]
pub async fn analyze_resume(
    form: Form<ResumeAnalysisForm<'_>>,
    services: &State<Services>,
) -> ApiResponse<AnalysisPayload> {
    handlers::analyze_resume_handler(form, services).await
}

#[post("/resume-review", data = "<form>")]
pub async fn resume_review(
    form: Form<ResumeReviewForm<'_>>,
    services: &State<Services>,
) -> ApiResponse<ReviewPayload> {
    handlers::resume_review_handler(form, services).await
}

#[get("/health")]
pub async fn health(services: &State<Services>) -> Json<Envelope<HealthPayload>> {
    handlers::health_handler(services).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

type ErrorResponse = Json<Envelope<serde_json::Value>>;

#[rocket::catch(400)]
pub fn bad_request() -> ErrorResponse {
    Json(Envelope::failure("Invalid request format".to_string()))
}

#[rocket::catch(404)]
pub fn not_found() -> ErrorResponse {
    Json(Envelope::failure("Not found".to_string()))
}

#[rocket::catch(413)]
pub fn payload_too_large() -> ErrorResponse {
    Json(Envelope::failure("Request body too large".to_string()))
}

#[rocket::catch(422)]
pub fn unprocessable() -> ErrorResponse {
    Json(Envelope::failure("Missing or malformed request fields".to_string()))
}

#[rocket::catch(500)]
pub fn internal_error() -> ErrorResponse {
    Json(Envelope::failure("Internal server error".to_string()))
}

#[rocket::catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> (Status, ErrorResponse) {
    let reason = status.reason().unwrap_or("Request failed");
    (status, Json(Envelope::failure(reason.to_string())))
}

pub fn build_rocket(services: Services) -> Result<rocket::Rocket<rocket::Build>> {
    let server = &services.config.app.server;
    let address: IpAddr = server
        .address
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address '{}': {}", server.address, e))?;

    let limits = Limits::default()
        .limit("file", 10.mebibytes())
        .limit("data-form", 12.mebibytes())
        .limit("json", 2.mebibytes());

    let figment = rocket::Config::figment()
        .merge(("address", address))
        .merge(("port", server.port))
        .merge(("limits", limits));

    Ok(rocket::custom(figment)
        .attach(Cors)
        .manage(services)
        .register(
            "/api",
            catchers![
                bad_request,
                not_found,
                payload_too_large,
                unprocessable,
                internal_error,
                default_catcher
            ],
        )
        .mount(
            "/api",
            routes![
                scrape_job,
                scrape_jobs,
                generate_cover_letter,
                optimize_cover_letter,
                analyze_resume,
                resume_review,
                health,
                options,
            ],
        ))
}

pub async fn start_web_server(services: Services) -> Result<()> {
    let server = services.config.app.server.clone();
    info!("Starting job assistant API on {}:{}", server.address, server.port);
    info!("Environment: {}", services.config.environment);

    let _rocket = build_rocket(services)?
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;
    Ok(())
}
