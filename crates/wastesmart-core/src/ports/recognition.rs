//! Recognition service port.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::RecognitionOutcome;

/// Client for the external ML recognition service.
#[async_trait]
pub trait RecognitionClient: Send + Sync {
    /// Submit a base64-encoded image for recognition.
    async fn recognize(
        &self,
        image_base64: &str,
        location: &str,
    ) -> Result<RecognitionOutcome, RecognitionError>;

    /// Probe the service's health endpoint.
    async fn health(&self) -> Result<serde_json::Value, RecognitionError>;
}

/// Failures talking to the recognition service, mapped from transport
/// errors so the HTTP layer can pick the right status.
#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    /// Could not reach the service at all (maps to 503).
    #[error("Recognition service unavailable: {0}")]
    Unavailable(String),

    /// The service did not answer within the deadline (maps to 504).
    #[error("Recognition service timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-success status (relayed).
    #[error("Recognition service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The service answered 2xx but the body did not parse.
    #[error("Invalid recognition payload: {0}")]
    Payload(String),
}
