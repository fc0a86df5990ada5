//! Recognition proxy handlers.

use std::time::Instant;

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Serialize;

use wastesmart_core::domain::{RecognitionOutcome, validate_postcode};
use wastesmart_shared::dto::RecognizeRequest;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const DEFAULT_LOCATION: &str = "SW1A 1AA";

#[derive(Serialize)]
struct RecognizeResponse {
    #[serde(flatten)]
    outcome: RecognitionOutcome,
    /// Round-trip time spent in this backend, in milliseconds.
    proxy_time_ms: u64,
    backend_timestamp: DateTime<Utc>,
}

/// POST /api/v1/recognize
///
/// Pass-through proxy: the base64 image goes to the ML service
/// unchanged, the detection list comes back unchanged.
pub async fn recognize(
    state: web::Data<AppState>,
    body: web::Json<RecognizeRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.image.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Please provide an image to recognize".to_string(),
        ));
    }

    let location = match req.location {
        Some(location) => {
            validate_postcode(&location)?;
            location
        }
        None => DEFAULT_LOCATION.to_string(),
    };

    let started = Instant::now();
    let outcome = state.recognizer.recognize(&req.image, &location).await?;

    Ok(HttpResponse::Ok().json(RecognizeResponse {
        outcome,
        proxy_time_ms: started.elapsed().as_millis() as u64,
        backend_timestamp: Utc::now(),
    }))
}

/// GET /api/v1/recognize/status
pub async fn status(state: web::Data<AppState>) -> HttpResponse {
    match state.recognizer.health().await {
        Ok(payload) => HttpResponse::Ok().json(serde_json::json!({
            "status": "connected",
            "ml_service": payload,
            "timestamp": Utc::now().to_rfc3339(),
        })),
        Err(err) => {
            tracing::warn!("ML service health probe failed: {}", err);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "disconnected",
                "error": "ML service unavailable",
                "timestamp": Utc::now().to_rfc3339(),
            }))
        }
    }
}
