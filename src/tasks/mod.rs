//! Background tasks module
//! 
//! This module contains the periodic tick task that drives a running timer.

pub mod tick;

// Re-export main types
pub use tick::{TickHandle, TICK_PERIOD};
pub(crate) use tick::spawn_tick;
