//! # WasteSmart Infrastructure
//!
//! Concrete implementations of the ports defined in `wastesmart-core`,
//! plus the static item and council directories.
//!
//! Everything here is in-process memory by design: the backend mirrors a
//! deployment where durable storage is stubbed out, so state lives for
//! the lifetime of the process only.

pub mod directory;
pub mod feedback;
pub mod rate_limit;
pub mod recognition;

pub use directory::{CouncilDirectory, ItemCatalog};
pub use feedback::InMemoryFeedbackLog;
pub use rate_limit::{FixedWindowLimiter, RateLimitConfig};
pub use recognition::{HttpRecognitionClient, RecognitionConfig};
