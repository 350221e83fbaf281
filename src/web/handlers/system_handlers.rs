// src/web/handlers/system_handlers.rs
use crate::types::response::Envelope;
use crate::web::types::HealthPayload;
use crate::Services;
use rocket::serde::json::Json;
use rocket::State;

pub async fn health_handler(services: &State<Services>) -> Json<Envelope<HealthPayload>> {
    Json(Envelope::success(HealthPayload {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: services.config.environment.clone(),
    }))
}
