//! Timer state snapshot

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle of a scheduled tick
///
/// A new id is issued every time the timer schedules its periodic tick, so two
/// ids compare equal only when they refer to the same scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickId(pub(crate) u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}

/// Read-only view of a timer at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Duration configured by the last `set_duration` or `start_with`
    pub initial_duration: u64,
    /// Seconds left in the countdown
    pub current_duration: u64,
    /// Handle of the active tick, `None` while idle
    pub id: Option<TickId>,
}

impl TimerSnapshot {
    /// Create an idle snapshot with no configured duration
    pub fn new() -> Self {
        Self {
            initial_duration: 0,
            current_duration: 0,
            id: None,
        }
    }

    /// Check if a tick was scheduled when the snapshot was taken
    pub fn is_running(&self) -> bool {
        self.id.is_some()
    }

    /// Seconds already counted down from the configured duration
    pub fn elapsed(&self) -> u64 {
        self.initial_duration.saturating_sub(self.current_duration)
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snapshot_is_idle() {
        let snapshot = TimerSnapshot::new();
        assert!(!snapshot.is_running());
        assert_eq!(snapshot.current_duration, 0);
        assert_eq!(snapshot.initial_duration, 0);
    }

    #[test]
    fn elapsed_never_underflows() {
        let snapshot = TimerSnapshot {
            initial_duration: 3,
            current_duration: 5,
            id: None,
        };
        assert_eq!(snapshot.elapsed(), 0);

        let snapshot = TimerSnapshot {
            initial_duration: 10,
            current_duration: 4,
            id: Some(TickId(1)),
        };
        assert_eq!(snapshot.elapsed(), 6);
        assert!(snapshot.is_running());
    }

    #[test]
    fn tick_id_serializes_as_number() {
        let snapshot = TimerSnapshot {
            initial_duration: 5,
            current_duration: 5,
            id: Some(TickId(7)),
        };
        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["current_duration"], 5);
    }
}
