//! HTTP client for the external ML recognition service.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use wastesmart_core::domain::RecognitionOutcome;
use wastesmart_core::ports::{RecognitionClient, RecognitionError};

/// Recognition service connection settings.
#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    pub base_url: String,
    /// Deadline for a recognize call; model inference is slow.
    pub recognize_timeout: Duration,
    /// Deadline for the health probe.
    pub health_timeout: Duration,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            recognize_timeout: Duration::from_secs(30),
            health_timeout: Duration::from_secs(5),
        }
    }
}

impl RecognitionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("ML_SERVICE_URL").unwrap_or(defaults.base_url),
            ..defaults
        }
    }
}

/// Proxy client: forwards the base64 image and location as JSON and
/// relays the detection list back.
pub struct HttpRecognitionClient {
    http: reqwest::Client,
    config: RecognitionConfig,
}

impl HttpRecognitionClient {
    pub fn new(config: RecognitionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn map_transport(error: reqwest::Error, deadline: Duration) -> RecognitionError {
        if error.is_timeout() {
            RecognitionError::Timeout(deadline)
        } else {
            RecognitionError::Unavailable(error.to_string())
        }
    }

    /// Pull a human-readable message out of an upstream error body.
    async fn upstream_message(response: reqwest::Response) -> String {
        match response.json::<Value>().await {
            Ok(body) => body
                .get("message")
                .or_else(|| body.get("detail"))
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| "Error processing image".to_string()),
            Err(_) => "Error processing image".to_string(),
        }
    }
}

#[async_trait]
impl RecognitionClient for HttpRecognitionClient {
    async fn recognize(
        &self,
        image_base64: &str,
        location: &str,
    ) -> Result<RecognitionOutcome, RecognitionError> {
        let deadline = self.config.recognize_timeout;

        let response = self
            .http
            .post(self.endpoint("recognize"))
            .timeout(deadline)
            .json(&json!({ "image": image_base64, "location": location }))
            .send()
            .await
            .map_err(|e| Self::map_transport(e, deadline))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecognitionError::Upstream {
                status: status.as_u16(),
                message: Self::upstream_message(response).await,
            });
        }

        response
            .json::<RecognitionOutcome>()
            .await
            .map_err(|e| RecognitionError::Payload(e.to_string()))
    }

    async fn health(&self) -> Result<Value, RecognitionError> {
        let deadline = self.config.health_timeout;

        let response = self
            .http
            .get(self.endpoint("health"))
            .timeout(deadline)
            .send()
            .await
            .map_err(|e| Self::map_transport(e, deadline))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecognitionError::Upstream {
                status: status.as_u16(),
                message: Self::upstream_message(response).await,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| RecognitionError::Payload(e.to_string()))
    }
}
