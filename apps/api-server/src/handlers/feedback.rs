//! Feedback submission and statistics handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;

use wastesmart_core::domain::FeedbackInput;
use wastesmart_shared::ApiResponse;
use wastesmart_shared::dto::{AccuracyQuery, AccuracySummary, BatchSubmitted, FeedbackSubmitted};

use crate::middleware::error::AppResult;
use crate::state::AppState;

const DEFAULT_TIMEFRAME: &str = "7d";

#[derive(Debug, Deserialize)]
pub struct BatchFeedbackRequest {
    pub feedback_items: Vec<FeedbackInput>,
}

/// POST /api/v1/feedback
pub async fn submit(
    state: web::Data<AppState>,
    body: web::Json<FeedbackInput>,
) -> AppResult<HttpResponse> {
    let event = state.feedback.record(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        FeedbackSubmitted {
            feedback_id: event.id,
            timestamp: event.timestamp,
        },
        "Feedback submitted successfully",
    )))
}

/// POST /api/v1/feedback/batch
pub async fn submit_batch(
    state: web::Data<AppState>,
    body: web::Json<BatchFeedbackRequest>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .feedback
        .record_batch(body.into_inner().feedback_items)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        BatchSubmitted {
            saved_count: outcome.saved_count,
            total_submitted: outcome.total_submitted,
            timestamp: Utc::now(),
        },
        format!("Successfully saved {} feedback items", outcome.saved_count),
    )))
}

/// GET /api/v1/feedback/stats
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.feedback.stats().await))
}

/// GET /api/v1/feedback/accuracy
pub async fn accuracy(
    state: web::Data<AppState>,
    query: web::Query<AccuracyQuery>,
) -> HttpResponse {
    let stats = state.feedback.stats().await;

    let summary = AccuracySummary {
        accuracy_percentage: (stats.overall_accuracy * 100.0).round() / 100.0,
        total_feedback: stats.total_feedback,
        correct_feedback: stats.correct_feedback,
        incorrect_feedback: stats.incorrect_feedback,
        timeframe: query
            .into_inner()
            .timeframe
            .unwrap_or_else(|| DEFAULT_TIMEFRAME.to_string()),
        confidence_breakdown: stats.confidence_breakdown,
    };

    HttpResponse::Ok().json(ApiResponse::ok(summary))
}

/// GET /api/v1/feedback/analysis
pub async fn analysis(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.feedback.analyze().await))
}
