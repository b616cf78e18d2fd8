use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;

use crate::models::{AddBookmarkRequest, UpdateUserRequest};
use crate::routes::{store_error_response, validation_error_response, AppState};

/// Configure user routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::get().to(list_users))
        .route("/users/{id}", web::get().to(get_user))
        .route("/users/{id}", web::patch().to(update_user))
        .route("/users/{id}/bookmarks", web::get().to(get_bookmarks))
        .route("/users/{id}/bookmarks", web::post().to(add_bookmark))
        .route(
            "/users/{id}/bookmarks/{shelterId}",
            web::delete().to(remove_bookmark),
        );
}

/// List user summaries, optionally excluding the caller
///
/// GET /api/v1/users?exclude={userId}
async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let exclude = query.get("exclude").map(String::as_str).filter(|s| !s.is_empty());

    match state.postgres.list_users(exclude).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => store_error_response("Failed to list users", e),
    }
}

/// Fetch a user's public view
///
/// GET /api/v1/users/{id}
async fn get_user(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.postgres.get_user(&path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => store_error_response("Failed to fetch user", e),
    }
}

/// Patch a user's editable fields (name, avatar, preferences)
///
/// PATCH /api/v1/users/{id}
async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateUserRequest>,
) -> impl Responder {
    match state.postgres.update_user(&path.into_inner(), &req).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => store_error_response("Failed to update user", e),
    }
}

/// Fetch a user's bookmarked shelter ids
///
/// GET /api/v1/users/{id}/bookmarks
async fn get_bookmarks(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.postgres.get_bookmarks(&path.into_inner()).await {
        Ok(bookmarks) => HttpResponse::Ok().json(bookmarks),
        Err(e) => store_error_response("Failed to fetch bookmarks", e),
    }
}

/// Bookmark a shelter for a user
///
/// POST /api/v1/users/{id}/bookmarks
async fn add_bookmark(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<AddBookmarkRequest>,
) -> impl Responder {
    if req.shelter_id <= 0 {
        return validation_error_response("shelterId is required".to_string());
    }

    match state
        .postgres
        .add_bookmark(&path.into_inner(), req.shelter_id)
        .await
    {
        Ok(bookmarks) => HttpResponse::Ok().json(bookmarks),
        Err(e) => store_error_response("Failed to add bookmark", e),
    }
}

/// Remove a bookmarked shelter
///
/// DELETE /api/v1/users/{id}/bookmarks/{shelterId}
async fn remove_bookmark(
    state: web::Data<AppState>,
    path: web::Path<(String, i64)>,
) -> impl Responder {
    let (user_id, shelter_id) = path.into_inner();

    match state.postgres.remove_bookmark(&user_id, shelter_id).await {
        Ok(bookmarks) => HttpResponse::Ok().json(bookmarks),
        Err(e) => store_error_response("Failed to remove bookmark", e),
    }
}
