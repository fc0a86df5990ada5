//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use wastesmart_core::DomainError;
use wastesmart_core::ports::RecognitionError;
use wastesmart_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound {
        detail: String,
        suggestions: Vec<String>,
    },
    ServiceUnavailable(String),
    GatewayTimeout(String),
    /// Relay of a non-success status from the recognition service.
    Upstream {
        status: u16,
        message: String,
    },
    Internal(String),
}

impl AppError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn not_found_with_suggestions(
        detail: impl Into<String>,
        suggestions: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        Self::NotFound {
            detail: detail.into(),
            suggestions: suggestions.into_iter().map(String::from).collect(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound { detail, .. } => write!(f, "Not found: {}", detail),
            AppError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            AppError::GatewayTimeout(msg) => write!(f, "Gateway timeout: {}", msg),
            AppError::Upstream { status, message } => {
                write!(f, "Upstream error {}: {}", status, message)
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::NotFound {
                detail,
                suggestions,
            } => ErrorResponse::not_found(detail).with_suggestions(suggestions.clone()),
            AppError::ServiceUnavailable(detail) => ErrorResponse::service_unavailable(detail),
            AppError::GatewayTimeout(detail) => ErrorResponse::gateway_timeout(detail),
            AppError::Upstream { status, message } => {
                ErrorResponse::new(*status, "Recognition Service Error").with_detail(message)
            }
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::NotFound { what, key } => {
                AppError::not_found(format!("{} not found: {}", what, key))
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RecognitionError> for AppError {
    fn from(err: RecognitionError) -> Self {
        match err {
            RecognitionError::Unavailable(_) => {
                tracing::warn!("Recognition service unreachable: {}", err);
                AppError::ServiceUnavailable(
                    "Image recognition service is currently unavailable".to_string(),
                )
            }
            RecognitionError::Timeout(_) => {
                tracing::warn!("Recognition service timed out: {}", err);
                AppError::GatewayTimeout("Image recognition timed out".to_string())
            }
            RecognitionError::Upstream { status, message } => AppError::Upstream { status, message },
            RecognitionError::Payload(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
