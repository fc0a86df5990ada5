//! Wire types for the external ML recognition service.
//!
//! The backend is a pass-through proxy: known fields are typed, anything
//! else the service attaches is preserved via flattened maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One detected item in an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub item: String,
    pub confidence: f64,
    /// Everything else the model reports (bbox, bin_color, disposal
    /// guidance, ...), relayed untouched.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// The recognition service's reply to a recognize call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionOutcome {
    pub success: bool,
    pub detections: Vec<Detection>,
    /// Model-side processing time in seconds.
    pub processing_time: f64,
    #[serde(default)]
    pub model_info: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
