use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::filters::ServiceFilter;
use crate::models::{
    CheckInRequest, CheckInResponse, ErrorResponse, RankSheltersRequest, RankSheltersResponse,
};
use crate::routes::{store_error_response, validation_error_response, AppState};

/// Configure shelter routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/shelters", web::get().to(list_shelters))
        .route("/shelters/rank", web::post().to(rank_shelters))
        .route("/shelters/{id}", web::get().to(get_shelter))
        .route("/shelters/{id}/checkin", web::post().to(check_in));
}

/// List all shelters in id order
///
/// GET /api/v1/shelters
async fn list_shelters(state: web::Data<AppState>) -> impl Responder {
    match state.postgres.list_shelters().await {
        Ok(shelters) => HttpResponse::Ok().json(shelters),
        Err(e) => store_error_response("Failed to list shelters", e),
    }
}

/// Fetch a single shelter
///
/// GET /api/v1/shelters/{id}
async fn get_shelter(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match state.postgres.get_shelter(path.into_inner()).await {
        Ok(shelter) => HttpResponse::Ok().json(shelter),
        Err(e) => store_error_response("Failed to fetch shelter", e),
    }
}

/// Rank shelters for a user's preferences
///
/// POST /api/v1/shelters/rank
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "query": "harbor",
///   "service": "meals",
///   "limit": 20,
///   "latitude": 40.7,
///   "longitude": -74.0
/// }
/// ```
async fn rank_shelters(
    state: web::Data<AppState>,
    req: web::Json<RankSheltersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank_shelters request: {:?}", errors);
        return validation_error_response(errors.to_string());
    }

    let Some(filter) = ServiceFilter::parse(&req.service) else {
        return validation_error_response(format!("Unknown service filter: {}", req.service));
    };

    // Preferences come from the user record when a userId is supplied;
    // anonymous callers can inline them or fall back to defaults.
    let prefs = match &req.user_id {
        Some(user_id) => match state.postgres.get_preferences(user_id).await {
            Ok(prefs) => prefs,
            Err(e) => return store_error_response("Failed to fetch preferences", e),
        },
        None => req.preferences.clone().unwrap_or_default(),
    };

    let shelters = match state.postgres.list_shelters().await {
        Ok(shelters) => shelters,
        Err(e) => return store_error_response("Failed to list shelters", e),
    };

    let origin = match (req.latitude, req.longitude) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        _ => None,
    };

    // Cap limit at 100 to prevent excessive payloads
    let limit = req.limit.map(|l| l.min(100) as usize);

    match state.matcher.rank(shelters, &req.query, &filter, &prefs, origin, limit) {
        Ok(result) => {
            tracing::info!(
                "Ranked {} shelters (from {} candidates)",
                result.shelters.len(),
                result.total_candidates
            );
            HttpResponse::Ok().json(RankSheltersResponse {
                shelters: result.shelters,
                total_candidates: result.total_candidates,
            })
        }
        Err(e) => {
            // Scoring only fails on invalid stored data; surface as 500.
            tracing::error!("Ranking failed on invalid shelter data: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to rank shelters".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Check a user in at a shelter, incrementing its occupancy
///
/// POST /api/v1/shelters/{id}/checkin
async fn check_in(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: Option<web::Json<CheckInRequest>>,
) -> impl Responder {
    let shelter_id = path.into_inner();

    let current = match state.postgres.check_in(shelter_id).await {
        Ok(current) => current,
        Err(e) => return store_error_response("Failed to check in", e),
    };

    // Check-in history is best-effort metadata: a failure here must not
    // roll back the occupancy increment the caller already got.
    let user_id = req.and_then(|body| body.user_id.clone());
    if let Some(user_id) = &user_id {
        if let Err(e) = state.postgres.record_check_in(user_id, shelter_id).await {
            tracing::warn!(
                "Check-in recorded for shelter {} but user {} history update failed: {}",
                shelter_id,
                user_id,
                e
            );
        }
    }

    HttpResponse::Ok().json(CheckInResponse {
        shelter_id,
        current,
    })
}
