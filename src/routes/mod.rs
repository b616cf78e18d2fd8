// Route exports
pub mod connections;
pub mod shelters;
pub mod users;

use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::Matcher;
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{PostgresClient, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(shelters::configure)
            .configure(users::configure)
            .configure(connections::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Map a store error onto the uniform JSON error body. Unexpected
/// failures are logged here; the client only sees the generic message.
pub(crate) fn store_error_response(error: &str, e: StoreError) -> HttpResponse {
    let status_code = e.status_code();
    if status_code >= 500 {
        tracing::error!("{}: {}", error, e);
    }

    HttpResponse::build(
        StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .json(ErrorResponse {
        error: error.to_string(),
        message: e.to_string(),
        status_code,
    })
}

/// 400 helper for request validation failures
pub(crate) fn validation_error_response(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}
