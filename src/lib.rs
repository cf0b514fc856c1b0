//! Countdown - an event-emitting countdown timer
//! 
//! This library provides a [`Timer`] that counts a duration down once per
//! second on the Tokio runtime and notifies listeners when it starts, ticks,
//! pauses, resets, stops or toggles.

pub mod config;
pub mod error;
pub mod report;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use report::EventReport;
pub use state::{TickId, TimerSnapshot};
pub use timer::{sanitize_duration, Timer, TimerEvent};
pub use utils::signals::shutdown_signal;
