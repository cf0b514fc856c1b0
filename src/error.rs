//! Error types for timer operations

use serde_json::Value;
use thiserror::Error;

/// Errors raised by the timer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimerError {
    /// The value is not a non-negative whole number of seconds
    #[error("invalid duration {value}: expected a non-negative whole number of seconds")]
    InvalidDuration { value: Value },

    #[error("unknown timer event '{name}'")]
    UnknownEvent { name: String },
}
