//! Feedback entities and the aggregate statistics derived from them.
//!
//! A [`FeedbackEvent`] is one user-submitted judgment about whether a
//! recognition result was correct. Events are immutable once recorded;
//! aggregates are recomputed from the full log at query time rather than
//! maintained incrementally, which is fine given the bounded log.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// How many events the stats projection includes under `recent_feedback`.
const RECENT_FEEDBACK_WINDOW: usize = 10;

/// Overall accuracy above this is considered an improving trend.
const IMPROVING_ACCURACY_THRESHOLD: f64 = 85.0;

/// What kind of guidance the feedback refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Recognition,
    Disposal,
    General,
}

impl Default for FeedbackType {
    fn default() -> Self {
        Self::Recognition
    }
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recognition => "recognition",
            Self::Disposal => "disposal",
            Self::General => "general",
        }
    }
}

impl FromStr for FeedbackType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recognition" => Ok(Self::Recognition),
            "disposal" => Ok(Self::Disposal),
            "general" => Ok(Self::General),
            other => Err(DomainError::validation(format!(
                "Feedback type must be one of recognition, disposal, general (got '{other}')"
            ))),
        }
    }
}

/// Unvalidated feedback submission, as received from the wire.
///
/// `was_correct` and `feedback_type` stay loose here so that a malformed
/// item inside a batch can be skipped instead of failing the whole request;
/// [`FeedbackInput::validate`] is the single gate to a [`FeedbackEvent`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackInput {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub user_correction: Option<String>,
    #[serde(default)]
    pub was_correct: Option<bool>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub user_location: Option<String>,
    #[serde(default)]
    pub feedback_type: Option<String>,
}

impl FeedbackInput {
    /// Check all field-level constraints and resolve the feedback type.
    pub fn validate(&self) -> Result<(bool, FeedbackType), DomainError> {
        if self.item_id.trim().is_empty() {
            return Err(DomainError::validation("Item ID is required"));
        }

        let was_correct = self.was_correct.ok_or_else(|| {
            DomainError::validation("Please indicate if the recognition was correct")
        })?;

        if let Some(score) = self.confidence_score {
            if !(0.0..=100.0).contains(&score) {
                return Err(DomainError::validation(format!(
                    "Confidence score must be between 0 and 100 (got {score})"
                )));
            }
        }

        let feedback_type = match self.feedback_type.as_deref() {
            Some(raw) => raw.parse()?,
            None => FeedbackType::default(),
        };

        Ok((was_correct, feedback_type))
    }
}

/// One recorded feedback judgment. Immutable after insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub id: u64,
    pub item_id: String,
    pub user_correction: Option<String>,
    pub was_correct: bool,
    pub confidence_score: Option<f64>,
    pub user_location: Option<String>,
    pub feedback_type: FeedbackType,
    pub timestamp: DateTime<Utc>,
}

impl FeedbackEvent {
    /// Validate an input and stamp it with a store-assigned id and timestamp.
    pub fn from_input(id: u64, input: FeedbackInput) -> Result<Self, DomainError> {
        let (was_correct, feedback_type) = input.validate()?;

        Ok(Self {
            id,
            item_id: input.item_id,
            user_correction: input.user_correction,
            was_correct,
            confidence_score: input.confidence_score,
            user_location: input.user_location,
            feedback_type,
            timestamp: Utc::now(),
        })
    }
}

/// Per-type accuracy slice of the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeAccuracy {
    pub total: u64,
    pub correct: u64,
    pub accuracy: f64,
}

/// The last-10 projection included in the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentFeedback {
    pub item_id: String,
    pub was_correct: bool,
    pub feedback_type: FeedbackType,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate statistics over the full feedback log.
///
/// Derived, never stored - recomputed on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub total_feedback: u64,
    pub correct_feedback: u64,
    pub incorrect_feedback: u64,
    pub overall_accuracy: f64,
    pub confidence_breakdown: BTreeMap<String, u64>,
    pub accuracy_by_type: BTreeMap<String, TypeAccuracy>,
    pub recent_feedback: Vec<RecentFeedback>,
}

impl FeedbackStats {
    /// Compute the aggregate over `events` in insertion order.
    pub fn compute(events: &[FeedbackEvent]) -> Self {
        let total = events.len() as u64;
        let correct = events.iter().filter(|e| e.was_correct).count() as u64;

        let mut confidence_breakdown = BTreeMap::new();
        for event in events {
            if let Some(score) = event.confidence_score {
                *confidence_breakdown
                    .entry(decile_bucket(score))
                    .or_insert(0) += 1;
            }
        }

        let mut tallies: BTreeMap<&'static str, (u64, u64)> = BTreeMap::new();
        for event in events {
            let entry = tallies.entry(event.feedback_type.as_str()).or_insert((0, 0));
            entry.0 += 1;
            if event.was_correct {
                entry.1 += 1;
            }
        }
        let accuracy_by_type = tallies
            .into_iter()
            .map(|(kind, (total, correct))| {
                (
                    kind.to_string(),
                    TypeAccuracy {
                        total,
                        correct,
                        accuracy: percentage(correct, total),
                    },
                )
            })
            .collect();

        let recent_feedback = events
            .iter()
            .rev()
            .take(RECENT_FEEDBACK_WINDOW)
            .rev()
            .map(|e| RecentFeedback {
                item_id: e.item_id.clone(),
                was_correct: e.was_correct,
                feedback_type: e.feedback_type,
                timestamp: e.timestamp,
            })
            .collect();

        Self {
            total_feedback: total,
            correct_feedback: correct,
            incorrect_feedback: total - correct,
            overall_accuracy: percentage(correct, total),
            confidence_breakdown,
            accuracy_by_type,
            recent_feedback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyTrend {
    Improving,
    NeedsAttention,
}

/// Rule-based health assessment of the recognition model, derived from
/// the feedback log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelHealthReport {
    pub total_items_analyzed: u64,
    pub accuracy_trend: AccuracyTrend,
    pub problem_areas: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ModelHealthReport {
    /// Evaluate each health rule independently over the event log.
    ///
    /// A rule with no qualifying events is skipped rather than scored
    /// as 0% accuracy.
    pub fn derive(events: &[FeedbackEvent]) -> Self {
        let stats = FeedbackStats::compute(events);

        let accuracy_trend = if stats.overall_accuracy > IMPROVING_ACCURACY_THRESHOLD {
            AccuracyTrend::Improving
        } else {
            AccuracyTrend::NeedsAttention
        };

        let mut problem_areas = Vec::new();
        let mut recommendations = Vec::new();

        if let Some(recognition) = stats.accuracy_by_type.get(FeedbackType::Recognition.as_str()) {
            if recognition.accuracy < 80.0 {
                problem_areas.push("recognition_accuracy".to_string());
                recommendations.push("Retrain model with more diverse food waste images".to_string());
            }
        }

        if let Some(disposal) = stats.accuracy_by_type.get(FeedbackType::Disposal.as_str()) {
            if disposal.accuracy < 90.0 {
                problem_areas.push("disposal_guidance".to_string());
                recommendations.push("Update disposal rules database".to_string());
            }
        }

        let high_confidence: Vec<&FeedbackEvent> = events
            .iter()
            .filter(|e| e.confidence_score.is_some_and(|s| s > 80.0))
            .collect();
        if !high_confidence.is_empty() {
            let correct = high_confidence.iter().filter(|e| e.was_correct).count() as u64;
            if percentage(correct, high_confidence.len() as u64) < 90.0 {
                problem_areas.push("confidence_calibration".to_string());
                recommendations.push("Recalibrate model confidence scores".to_string());
            }
        }

        Self {
            total_items_analyzed: stats.total_feedback,
            accuracy_trend,
            problem_areas,
            recommendations,
        }
    }
}

/// Decile label for a confidence score, e.g. 82.5 -> "80-89".
fn decile_bucket(score: f64) -> String {
    let floor = (score / 10.0).floor() as i64 * 10;
    format!("{}-{}", floor, floor + 9)
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(item_id: &str, was_correct: bool, kind: FeedbackType, score: Option<f64>) -> FeedbackEvent {
        FeedbackEvent::from_input(
            0,
            FeedbackInput {
                item_id: item_id.to_string(),
                was_correct: Some(was_correct),
                confidence_score: score,
                feedback_type: Some(kind.as_str().to_string()),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn validate_rejects_empty_item_id() {
        let input = FeedbackInput {
            was_correct: Some(true),
            ..Default::default()
        };
        assert!(matches!(input.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_missing_was_correct() {
        let input = FeedbackInput {
            item_id: "apple_001".to_string(),
            ..Default::default()
        };
        assert!(matches!(input.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_out_of_range_confidence() {
        let input = FeedbackInput {
            item_id: "apple_001".to_string(),
            was_correct: Some(true),
            confidence_score: Some(100.5),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_feedback_type() {
        let input = FeedbackInput {
            item_id: "apple_001".to_string(),
            was_correct: Some(true),
            feedback_type: Some("guesswork".to_string()),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn feedback_type_defaults_to_recognition() {
        let input = FeedbackInput {
            item_id: "apple_001".to_string(),
            was_correct: Some(true),
            ..Default::default()
        };
        let (_, kind) = input.validate().unwrap();
        assert_eq!(kind, FeedbackType::Recognition);
    }

    #[test]
    fn stats_on_empty_log_are_all_zero() {
        let stats = FeedbackStats::compute(&[]);
        assert_eq!(stats.total_feedback, 0);
        assert_eq!(stats.correct_feedback, 0);
        assert_eq!(stats.incorrect_feedback, 0);
        assert_eq!(stats.overall_accuracy, 0.0);
        assert!(stats.confidence_breakdown.is_empty());
        assert!(stats.accuracy_by_type.is_empty());
        assert!(stats.recent_feedback.is_empty());
    }

    #[test]
    fn overall_accuracy_is_correct_over_total() {
        let mut events = Vec::new();
        for i in 0..8 {
            events.push(event(&format!("item_{i}"), true, FeedbackType::Recognition, None));
        }
        for i in 8..10 {
            events.push(event(&format!("item_{i}"), false, FeedbackType::Recognition, None));
        }

        let stats = FeedbackStats::compute(&events);
        assert_eq!(stats.total_feedback, 10);
        assert_eq!(stats.overall_accuracy, 80.0);
        let recognition = &stats.accuracy_by_type["recognition"];
        assert_eq!(recognition.total, 10);
        assert_eq!(recognition.correct, 8);
        assert_eq!(recognition.accuracy, 80.0);
    }

    #[test]
    fn confidence_breakdown_buckets_by_decile() {
        let events = vec![
            event("a", true, FeedbackType::Recognition, Some(82.0)),
            event("b", true, FeedbackType::Recognition, Some(85.0)),
            event("c", false, FeedbackType::Recognition, Some(91.0)),
            event("d", true, FeedbackType::Recognition, None),
        ];

        let stats = FeedbackStats::compute(&events);
        assert_eq!(stats.confidence_breakdown["80-89"], 2);
        assert_eq!(stats.confidence_breakdown["90-99"], 1);
        assert_eq!(stats.confidence_breakdown.len(), 2);
    }

    #[test]
    fn recent_feedback_keeps_last_ten_in_insertion_order() {
        let events: Vec<_> = (0..12)
            .map(|i| event(&format!("item_{i}"), true, FeedbackType::General, None))
            .collect();

        let stats = FeedbackStats::compute(&events);
        assert_eq!(stats.recent_feedback.len(), 10);
        assert_eq!(stats.recent_feedback[0].item_id, "item_2");
        assert_eq!(stats.recent_feedback[9].item_id, "item_11");
    }

    #[test]
    fn trend_improves_only_above_85() {
        let mut events: Vec<_> = (0..86)
            .map(|i| event(&format!("i{i}"), true, FeedbackType::General, None))
            .collect();
        events.extend((0..14).map(|i| event(&format!("j{i}"), false, FeedbackType::General, None)));

        let report = ModelHealthReport::derive(&events);
        assert_eq!(report.accuracy_trend, AccuracyTrend::Improving);

        // Exactly 85% is not an improvement.
        let mut events: Vec<_> = (0..85)
            .map(|i| event(&format!("i{i}"), true, FeedbackType::General, None))
            .collect();
        events.extend((0..15).map(|i| event(&format!("j{i}"), false, FeedbackType::General, None)));

        let report = ModelHealthReport::derive(&events);
        assert_eq!(report.accuracy_trend, AccuracyTrend::NeedsAttention);
    }

    #[test]
    fn recognition_problem_flagged_below_80_only() {
        // 75% recognition accuracy: flagged.
        let mut events: Vec<_> = (0..3)
            .map(|i| event(&format!("i{i}"), true, FeedbackType::Recognition, None))
            .collect();
        events.push(event("j", false, FeedbackType::Recognition, None));

        let report = ModelHealthReport::derive(&events);
        assert!(report.problem_areas.contains(&"recognition_accuracy".to_string()));
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("Retrain")));

        // 85% recognition accuracy: not flagged.
        let mut events: Vec<_> = (0..17)
            .map(|i| event(&format!("i{i}"), true, FeedbackType::Recognition, None))
            .collect();
        events.extend((0..3).map(|i| event(&format!("j{i}"), false, FeedbackType::Recognition, None)));

        let report = ModelHealthReport::derive(&events);
        assert!(!report.problem_areas.contains(&"recognition_accuracy".to_string()));
    }

    #[test]
    fn exactly_80_percent_recognition_is_not_a_problem() {
        let mut events: Vec<_> = (0..8)
            .map(|i| event(&format!("i{i}"), true, FeedbackType::Recognition, None))
            .collect();
        events.extend((0..2).map(|i| event(&format!("j{i}"), false, FeedbackType::Recognition, None)));

        let report = ModelHealthReport::derive(&events);
        assert!(!report.problem_areas.contains(&"recognition_accuracy".to_string()));
    }

    #[test]
    fn disposal_problem_flagged_below_90() {
        let mut events: Vec<_> = (0..8)
            .map(|i| event(&format!("i{i}"), true, FeedbackType::Disposal, None))
            .collect();
        events.extend((0..2).map(|i| event(&format!("j{i}"), false, FeedbackType::Disposal, None)));

        let report = ModelHealthReport::derive(&events);
        assert!(report.problem_areas.contains(&"disposal_guidance".to_string()));
    }

    #[test]
    fn absent_type_skips_its_rule() {
        // Only general feedback, all wrong: neither type rule may fire.
        let events: Vec<_> = (0..5)
            .map(|i| event(&format!("i{i}"), false, FeedbackType::General, None))
            .collect();

        let report = ModelHealthReport::derive(&events);
        assert!(!report.problem_areas.contains(&"recognition_accuracy".to_string()));
        assert!(!report.problem_areas.contains(&"disposal_guidance".to_string()));
    }

    #[test]
    fn confidence_calibration_flagged_when_high_confidence_misses() {
        // Two high-confidence events, one wrong: 50% < 90%.
        let events = vec![
            event("a", true, FeedbackType::Recognition, Some(95.0)),
            event("b", false, FeedbackType::Recognition, Some(90.0)),
            event("c", false, FeedbackType::Recognition, Some(40.0)),
        ];

        let report = ModelHealthReport::derive(&events);
        assert!(report.problem_areas.contains(&"confidence_calibration".to_string()));
    }

    #[test]
    fn confidence_calibration_skipped_without_high_confidence_events() {
        let events = vec![
            event("a", false, FeedbackType::General, Some(40.0)),
            event("b", false, FeedbackType::General, None),
        ];

        let report = ModelHealthReport::derive(&events);
        assert!(!report.problem_areas.contains(&"confidence_calibration".to_string()));
    }
}
