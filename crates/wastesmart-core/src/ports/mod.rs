//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod feedback;
mod rate_limit;
mod recognition;

pub use feedback::{BatchOutcome, FeedbackLog};
pub use rate_limit::{RateLimitDecision, RateLimitError, RateLimiter};
pub use recognition::{RecognitionClient, RecognitionError};
