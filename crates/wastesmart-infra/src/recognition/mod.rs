//! Recognition service clients.

mod http;

pub use http::{HttpRecognitionClient, RecognitionConfig};
