//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use wastesmart_core::ports::{FeedbackLog, RateLimiter, RecognitionClient};
use wastesmart_infra::{
    CouncilDirectory, FixedWindowLimiter, HttpRecognitionClient, InMemoryFeedbackLog, ItemCatalog,
    RecognitionConfig,
};

/// Shared application state.
///
/// Exactly one of each store exists per process; everything is held
/// behind `Arc` so actix can clone the state into each worker.
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<FixedWindowLimiter>,
    pub feedback: Arc<dyn FeedbackLog>,
    pub recognizer: Arc<dyn RecognitionClient>,
    pub items: Arc<ItemCatalog>,
    pub councils: Arc<CouncilDirectory>,
    pub environment: String,
    pub started_at: Instant,
}

impl AppState {
    /// Build the application state with the in-memory implementations.
    pub fn new(environment: impl Into<String>) -> Self {
        let limiter = Arc::new(FixedWindowLimiter::from_env());
        let recognizer = Arc::new(HttpRecognitionClient::new(RecognitionConfig::from_env()));

        tracing::info!("Application state initialized (in-memory stores)");

        Self {
            limiter,
            feedback: Arc::new(InMemoryFeedbackLog::new()),
            recognizer,
            items: Arc::new(ItemCatalog::new()),
            councils: Arc::new(CouncilDirectory::new()),
            environment: environment.into(),
            started_at: Instant::now(),
        }
    }

    /// The limiter as the trait object the middleware consumes.
    pub fn rate_limiter(&self) -> Arc<dyn RateLimiter> {
        self.limiter.clone()
    }
}
