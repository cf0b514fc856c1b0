//! Event report structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{state::TimerSnapshot, timer::TimerEvent};

/// One observed timer event, as printed by the countdown binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventReport {
    pub event: TimerEvent,
    pub initial_duration: u64,
    pub current_duration: u64,
    /// Seconds counted down since the duration was configured
    pub elapsed: u64,
    pub running: bool,
    pub timestamp: DateTime<Utc>,
}

impl EventReport {
    /// Create a report for `event` from the timer state seen by the listener
    pub fn new(event: TimerEvent, snapshot: TimerSnapshot) -> Self {
        Self {
            event,
            initial_duration: snapshot.initial_duration,
            current_duration: snapshot.current_duration,
            elapsed: snapshot.elapsed(),
            running: snapshot.is_running(),
            timestamp: Utc::now(),
        }
    }

    /// Render the report as a single JSON line
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for EventReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:<8} {}/{}s ({}s elapsed){}",
            self.timestamp.format("%H:%M:%S"),
            self.event,
            self.current_duration,
            self.initial_duration,
            self.elapsed,
            if self.running { "" } else { " (idle)" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TickId;

    #[test]
    fn report_copies_snapshot() {
        let snapshot = TimerSnapshot {
            initial_duration: 10,
            current_duration: 7,
            id: Some(TickId(3)),
        };
        let report = EventReport::new(TimerEvent::Interval, snapshot);

        assert_eq!(report.current_duration, 7);
        assert!(report.running);
        assert_eq!(report.elapsed, 3);
        assert!(report.to_string().contains("interval 7/10s (3s elapsed)"));
    }

    #[test]
    fn json_line_uses_event_names() {
        let report = EventReport::new(TimerEvent::Stop, TimerSnapshot::new());
        let line = report.to_json_line().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["event"], "stop");
        assert_eq!(value["running"], false);
        assert_eq!(value["elapsed"], 0);
        assert!(!line.contains('\n'));
    }
}
