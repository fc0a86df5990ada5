//! Feedback log port.

use async_trait::async_trait;

use crate::domain::{FeedbackEvent, FeedbackInput, FeedbackStats, FeedbackType, ModelHealthReport};
use crate::error::DomainError;

/// Result of a batch submission. Invalid items are dropped, not errors.
#[derive(Debug, Clone, Copy)]
pub struct BatchOutcome {
    pub saved_count: usize,
    pub total_submitted: usize,
}

/// Append-only, capacity-bounded log of feedback events with derived
/// aggregates. One instance per process.
#[async_trait]
pub trait FeedbackLog: Send + Sync {
    /// Validate and store one event, assigning its id and timestamp.
    async fn record(&self, input: FeedbackInput) -> Result<FeedbackEvent, DomainError>;

    /// Store a batch of 1..=100 inputs. Items failing validation are
    /// skipped silently; the outcome reports how many were kept.
    async fn record_batch(&self, inputs: Vec<FeedbackInput>) -> Result<BatchOutcome, DomainError>;

    /// Aggregate statistics, recomputed over the current log.
    async fn stats(&self) -> FeedbackStats;

    /// Rule-based model health assessment over the current log.
    async fn analyze(&self) -> ModelHealthReport;

    async fn by_item(&self, item_id: &str) -> Vec<FeedbackEvent>;

    async fn by_type(&self, feedback_type: FeedbackType) -> Vec<FeedbackEvent>;

    /// The last `limit` events, in insertion order.
    async fn recent(&self, limit: usize) -> Vec<FeedbackEvent>;

    /// Drop every stored event. Administrative operation.
    async fn clear(&self);
}
