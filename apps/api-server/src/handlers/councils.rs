//! Council lookup handlers.

use actix_web::{HttpResponse, web};

use wastesmart_core::DomainError;
use wastesmart_shared::{ApiResponse, ListResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/councils
pub async fn list(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ListResponse::of(state.councils.all()))
}

fn lookup(state: &AppState, postcode: &str) -> AppResult<wastesmart_core::domain::CouncilMatch> {
    state.councils.lookup(postcode).map_err(|err| match err {
        DomainError::NotFound { .. } => AppError::not_found_with_suggestions(
            format!("No council found for postcode: {postcode}"),
            [
                "Check the postcode format (e.g., SW1A 1AA)",
                "Try a different postcode",
                "Contact support if the issue persists",
            ],
        ),
        other => other.into(),
    })
}

/// GET /api/v1/councils/{postcode}
pub async fn by_postcode(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let matched = lookup(&state, &path)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(matched)))
}

/// GET /api/v1/councils/{postcode}/rules
pub async fn rules(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let postcode = path.into_inner();
    let matched = lookup(&state, &postcode)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({
        "council": matched.council.name,
        "postcode": postcode,
        "rules": matched.council.rules,
        "collection_schedule": matched.council.collection_schedule,
        "special_instructions": matched.council.special_instructions,
    }))))
}

/// GET /api/v1/councils/{postcode}/schedule
pub async fn schedule(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let postcode = path.into_inner();
    let matched = lookup(&state, &postcode)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({
        "council": matched.council.name,
        "postcode": postcode,
        "collection_schedule": matched.council.collection_schedule,
        "next_collection": matched.next_collection,
    }))))
}
