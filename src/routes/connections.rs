use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateConnectionRequest, ErrorResponse, RespondConnectionRequest};
use crate::routes::{store_error_response, validation_error_response, AppState};

/// Configure connection routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/connections", web::get().to(list_connections))
        .route("/connections", web::post().to(create_connection))
        .route("/connections/{id}", web::patch().to(respond_connection));
}

/// List all connection requests involving a user (sent + received)
///
/// GET /api/v1/connections?userId={userId}
async fn list_connections(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) if !id.is_empty() => id,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing userId parameter".to_string(),
                message: "userId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.postgres.list_connections(user_id).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => store_error_response("Failed to list connections", e),
    }
}

/// Send a connection request
///
/// POST /api/v1/connections
///
/// Request body:
/// ```json
/// {
///   "fromUserId": "string",
///   "toUserId": "string",
///   "message": "optional, truncated to 500 chars"
/// }
/// ```
async fn create_connection(
    state: web::Data<AppState>,
    req: web::Json<CreateConnectionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_connection request: {:?}", errors);
        return validation_error_response(errors.to_string());
    }

    match state
        .postgres
        .create_connection(&req.from_user_id, &req.to_user_id, &req.message)
        .await
    {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => store_error_response("Failed to create connection request", e),
    }
}

/// Respond to a pending connection request (receiver only)
///
/// PATCH /api/v1/connections/{id}
///
/// Request body: `{ "status": "accepted" | "rejected" }`
async fn respond_connection(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<RespondConnectionRequest>,
) -> impl Responder {
    // Malformed ids can't reference any record
    let Ok(id) = Uuid::parse_str(&path.into_inner()) else {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "Connection request not found".to_string(),
            message: "Connection request not found".to_string(),
            status_code: 404,
        });
    };

    match state.postgres.respond_connection(id, &req.status).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => store_error_response("Failed to respond to connection request", e),
    }
}
