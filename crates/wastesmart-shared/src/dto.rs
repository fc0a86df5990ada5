//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to recognize items in an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizeRequest {
    /// Base64-encoded image, forwarded to the ML service as-is.
    pub image: String,
    /// UK postcode for location-specific guidance.
    #[serde(default)]
    pub location: Option<String>,
}

/// Acknowledgment for a stored feedback event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSubmitted {
    pub feedback_id: u64,
    pub timestamp: DateTime<Utc>,
}

/// Acknowledgment for a feedback batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSubmitted {
    pub saved_count: usize,
    pub total_submitted: usize,
    pub timestamp: DateTime<Utc>,
}

/// Query parameters for listing items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemListQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

/// Query parameters for searching items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

/// Query parameters for the accuracy endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccuracyQuery {
    #[serde(default)]
    pub timeframe: Option<String>,
}

/// Accuracy summary served by the accuracy endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracySummary {
    pub accuracy_percentage: f64,
    pub total_feedback: u64,
    pub correct_feedback: u64,
    pub incorrect_feedback: u64,
    pub timeframe: String,
    pub confidence_breakdown: std::collections::BTreeMap<String, u64>,
}
