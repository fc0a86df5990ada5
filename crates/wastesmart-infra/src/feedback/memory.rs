//! In-memory feedback log - bounded to the most recent 1000 events.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use wastesmart_core::DomainError;
use wastesmart_core::domain::{
    FeedbackEvent, FeedbackInput, FeedbackStats, FeedbackType, ModelHealthReport,
};
use wastesmart_core::ports::{BatchOutcome, FeedbackLog};

/// Oldest events are evicted beyond this many.
const MAX_RETAINED: usize = 1000;

/// Upper bound on one batch submission.
const MAX_BATCH: usize = 100;

/// Append-only feedback log held in process memory.
///
/// Data is lost on restart. Appends and the trim that follows them run
/// under one write lock, so the retention cap holds after every completed
/// `record` even with concurrent writers.
pub struct InMemoryFeedbackLog {
    entries: RwLock<VecDeque<FeedbackEvent>>,
    next_id: AtomicU64,
}

impl InMemoryFeedbackLog {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            next_id: AtomicU64::new(1),
        }
    }

    async fn snapshot_events(&self) -> Vec<FeedbackEvent> {
        self.entries.read().await.iter().cloned().collect()
    }
}

impl Default for InMemoryFeedbackLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedbackLog for InMemoryFeedbackLog {
    async fn record(&self, input: FeedbackInput) -> Result<FeedbackEvent, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let event = FeedbackEvent::from_input(id, input)?;

        let mut entries = self.entries.write().await;
        entries.push_back(event.clone());
        while entries.len() > MAX_RETAINED {
            entries.pop_front();
        }

        Ok(event)
    }

    async fn record_batch(&self, inputs: Vec<FeedbackInput>) -> Result<BatchOutcome, DomainError> {
        if inputs.is_empty() {
            return Err(DomainError::validation(
                "At least one feedback item is required",
            ));
        }
        if inputs.len() > MAX_BATCH {
            return Err(DomainError::validation(
                "Maximum 100 feedback items per batch",
            ));
        }

        let total_submitted = inputs.len();
        let mut saved_count = 0;
        for input in inputs {
            // Invalid items are dropped, not reported.
            match self.record(input).await {
                Ok(_) => saved_count += 1,
                Err(DomainError::Validation(reason)) => {
                    tracing::debug!(%reason, "Skipping invalid batch feedback item");
                }
                Err(other) => return Err(other),
            }
        }

        Ok(BatchOutcome {
            saved_count,
            total_submitted,
        })
    }

    async fn stats(&self) -> FeedbackStats {
        FeedbackStats::compute(&self.snapshot_events().await)
    }

    async fn analyze(&self) -> ModelHealthReport {
        ModelHealthReport::derive(&self.snapshot_events().await)
    }

    async fn by_item(&self, item_id: &str) -> Vec<FeedbackEvent> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| e.item_id == item_id)
            .cloned()
            .collect()
    }

    async fn by_type(&self, feedback_type: FeedbackType) -> Vec<FeedbackEvent> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| e.feedback_type == feedback_type)
            .cloned()
            .collect()
    }

    async fn recent(&self, limit: usize) -> Vec<FeedbackEvent> {
        let entries = self.entries.read().await;
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(item_id: &str) -> FeedbackInput {
        FeedbackInput {
            item_id: item_id.to_string(),
            was_correct: Some(true),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn record_assigns_id_and_timestamp() {
        let log = InMemoryFeedbackLog::new();

        let first = log.record(input("apple_001")).await.unwrap();
        let second = log.record(input("apple_001")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.timestamp >= first.timestamp);
    }

    #[tokio::test]
    async fn record_rejects_invalid_input() {
        let log = InMemoryFeedbackLog::new();

        let result = log.record(FeedbackInput::default()).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(log.stats().await.total_feedback, 0);
    }

    #[tokio::test]
    async fn log_never_exceeds_the_retention_cap() {
        let log = InMemoryFeedbackLog::new();

        for i in 0..(MAX_RETAINED + 1) {
            log.record(input(&format!("item_{i}"))).await.unwrap();
            let len = log.recent(usize::MAX).await.len();
            assert_eq!(len, (i + 1).min(MAX_RETAINED));
        }

        // The oldest event is gone; the rest are intact.
        assert!(log.by_item("item_0").await.is_empty());
        assert_eq!(log.by_item("item_1").await.len(), 1);
        assert_eq!(log.by_item(&format!("item_{MAX_RETAINED}")).await.len(), 1);
    }

    #[tokio::test]
    async fn recent_returns_last_n_in_insertion_order() {
        let log = InMemoryFeedbackLog::new();
        for i in 0..5 {
            log.record(input(&format!("item_{i}"))).await.unwrap();
        }

        let recent = log.recent(3).await;
        let ids: Vec<&str> = recent.iter().map(|e| e.item_id.as_str()).collect();
        assert_eq!(ids, ["item_2", "item_3", "item_4"]);

        // A limit larger than the log returns everything.
        assert_eq!(log.recent(50).await.len(), 5);
    }

    #[tokio::test]
    async fn batch_rejects_empty_and_oversized_submissions() {
        let log = InMemoryFeedbackLog::new();

        let empty = log.record_batch(Vec::new()).await;
        assert!(matches!(empty, Err(DomainError::Validation(ref m)) if m.contains("At least one")));

        let oversized: Vec<_> = (0..101).map(|i| input(&format!("item_{i}"))).collect();
        let too_many = log.record_batch(oversized).await;
        assert!(
            matches!(too_many, Err(DomainError::Validation(ref m)) if m.contains("Maximum 100"))
        );
        assert_eq!(log.stats().await.total_feedback, 0);
    }

    #[tokio::test]
    async fn batch_skips_invalid_items_silently() {
        let log = InMemoryFeedbackLog::new();

        let mut inputs: Vec<_> = (0..95).map(|i| input(&format!("item_{i}"))).collect();
        inputs.extend((0..5).map(|_| FeedbackInput {
            was_correct: Some(true),
            ..Default::default()
        }));

        let outcome = log.record_batch(inputs).await.unwrap();
        assert_eq!(outcome.saved_count, 95);
        assert_eq!(outcome.total_submitted, 100);
        assert_eq!(log.stats().await.total_feedback, 95);
    }

    #[tokio::test]
    async fn by_type_filters_events() {
        let log = InMemoryFeedbackLog::new();
        log.record(input("a")).await.unwrap();
        log.record(FeedbackInput {
            item_id: "b".to_string(),
            was_correct: Some(false),
            feedback_type: Some("disposal".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(log.by_type(FeedbackType::Recognition).await.len(), 1);
        assert_eq!(log.by_type(FeedbackType::Disposal).await.len(), 1);
        assert!(log.by_type(FeedbackType::General).await.is_empty());
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let log = InMemoryFeedbackLog::new();
        log.record(input("a")).await.unwrap();

        log.clear().await;

        assert_eq!(log.stats().await.total_feedback, 0);
        assert!(log.recent(10).await.is_empty());
    }

    #[tokio::test]
    async fn stats_reflect_recorded_events() {
        let log = InMemoryFeedbackLog::new();
        for i in 0..8 {
            log.record(input(&format!("item_{i}"))).await.unwrap();
        }
        for i in 0..2 {
            log.record(FeedbackInput {
                item_id: format!("wrong_{i}"),
                was_correct: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let stats = log.stats().await;
        assert_eq!(stats.total_feedback, 10);
        assert_eq!(stats.correct_feedback, 8);
        assert_eq!(stats.incorrect_feedback, 2);
        assert_eq!(stats.overall_accuracy, 80.0);
    }
}
