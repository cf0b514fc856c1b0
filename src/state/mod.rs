//! Timer state module
//! 
//! This module contains the plain-data views of a timer that listeners and
//! reporters can inspect without touching the live timer.

pub mod timer_state;

// Re-export main types
pub use timer_state::{TickId, TimerSnapshot};
