//! Timer events and listener registry

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Timer;
use crate::error::TimerError;

/// Events emitted by a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerEvent {
    Start,
    Interval,
    Pause,
    Reset,
    Stop,
    Toggle,
}

impl TimerEvent {
    /// Every event kind
    pub const ALL: [TimerEvent; 6] = [
        TimerEvent::Start,
        TimerEvent::Interval,
        TimerEvent::Pause,
        TimerEvent::Reset,
        TimerEvent::Stop,
        TimerEvent::Toggle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerEvent::Start => "start",
            TimerEvent::Interval => "interval",
            TimerEvent::Pause => "pause",
            TimerEvent::Reset => "reset",
            TimerEvent::Stop => "stop",
            TimerEvent::Toggle => "toggle",
        }
    }
}

impl fmt::Display for TimerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TimerEvent {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|event| event.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| TimerError::UnknownEvent {
                name: name.to_string(),
            })
    }
}

/// Callback invoked with the emitting timer and the emit arguments
pub type Listener = Arc<dyn Fn(&Timer, &[Value]) + Send + Sync>;

/// Ordered listeners per event
///
/// The same callback may be registered several times and then runs once per
/// registration.
#[derive(Default)]
pub struct EventRegistry {
    listeners: HashMap<TimerEvent, Vec<Listener>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener for `event`
    pub fn add(&mut self, event: TimerEvent, listener: Listener) {
        self.listeners.entry(event).or_default().push(listener);
    }

    /// Listeners for `event` in registration order
    ///
    /// Returns owned handles so the caller can run them without keeping the
    /// registry borrowed.
    pub fn listeners(&self, event: TimerEvent) -> Vec<Listener> {
        self.listeners.get(&event).cloned().unwrap_or_default()
    }

    pub fn count(&self, event: TimerEvent) -> usize {
        self.listeners.get(&event).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(Vec::is_empty)
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<TimerEvent, usize> = self
            .listeners
            .iter()
            .map(|(event, listeners)| (*event, listeners.len()))
            .collect();
        f.debug_struct("EventRegistry").field("listeners", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_event_names() {
        assert_eq!("interval".parse::<TimerEvent>(), Ok(TimerEvent::Interval));
        assert_eq!(" Stop ".parse::<TimerEvent>(), Ok(TimerEvent::Stop));
        assert_eq!(
            "foobar".parse::<TimerEvent>(),
            Err(TimerError::UnknownEvent {
                name: "foobar".to_string()
            })
        );

        for event in TimerEvent::ALL {
            assert_eq!(event.to_string().parse::<TimerEvent>(), Ok(event));
        }
    }

    #[test]
    fn registry_keeps_duplicates_in_order() {
        let mut registry = EventRegistry::new();
        assert!(registry.is_empty());

        let listener: Listener = Arc::new(|_: &Timer, _: &[Value]| {});
        registry.add(TimerEvent::Start, listener.clone());
        registry.add(TimerEvent::Start, listener.clone());
        registry.add(TimerEvent::Interval, listener);

        assert!(!registry.is_empty());
        assert_eq!(registry.count(TimerEvent::Start), 2);
        assert_eq!(registry.count(TimerEvent::Interval), 1);
        assert_eq!(registry.count(TimerEvent::Stop), 0);
        assert!(registry.listeners(TimerEvent::Toggle).is_empty());
        assert!(Arc::ptr_eq(
            &registry.listeners(TimerEvent::Start)[0],
            &registry.listeners(TimerEvent::Start)[1]
        ));
    }

    #[test]
    fn event_names_serialize_lowercase() {
        assert_eq!(serde_json::to_value(TimerEvent::Toggle).unwrap(), "toggle");
    }
}
