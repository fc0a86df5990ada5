//! Feedback log implementations.

mod memory;

pub use memory::InMemoryFeedbackLog;
