//! Countdown timer
//!
//! A [`Timer`] counts a duration down once per second and notifies listeners
//! registered per [`TimerEvent`].

pub mod duration;
pub mod events;

pub use duration::sanitize_duration;
pub use events::{EventRegistry, Listener, TimerEvent};

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::TimerError,
    state::{TickId, TimerSnapshot},
    tasks::{spawn_tick, TickHandle},
};

/// Mutable timer state, guarded by the timer's lock
#[derive(Debug, Default)]
struct TimerInner {
    initial_duration: u64,
    current_duration: u64,
    tick: Option<TickHandle>,
    last_tick_id: u64,
    events: EventRegistry,
}

impl TimerInner {
    fn configure(&mut self, seconds: u64) {
        self.initial_duration = seconds;
        self.current_duration = seconds;
    }

    fn tick_id(&self) -> Option<TickId> {
        self.tick.as_ref().map(TickHandle::id)
    }

    fn next_tick_id(&mut self) -> TickId {
        self.last_tick_id += 1;
        TickId(self.last_tick_id)
    }

    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            initial_duration: self.initial_duration,
            current_duration: self.current_duration,
            id: self.tick_id(),
        }
    }
}

/// Event-emitting countdown timer
///
/// `Timer` is a handle: clones share the same countdown, listeners and tick.
/// Listeners receive the emitting timer as an explicit argument and may call
/// any control method on it while they run.
///
/// Methods that schedule the tick ([`start`](Self::start),
/// [`start_with`](Self::start_with), [`toggle`](Self::toggle) and
/// [`reset`](Self::reset) on a running timer) must be called from within a
/// Tokio runtime. Call [`stop`](Self::stop) or [`pause`](Self::pause) before
/// discarding a running timer. Listeners should act on the `&Timer` they are
/// given: a listener that captures a clone of the timer keeps it, and its
/// tick, alive after every other handle is dropped.
#[derive(Clone, Default)]
pub struct Timer {
    inner: Arc<Mutex<TimerInner>>,
}

/// Non-owning reference held by the tick task
#[derive(Clone)]
pub(crate) struct WeakTimer(Weak<Mutex<TimerInner>>);

impl WeakTimer {
    pub(crate) fn upgrade(&self) -> Option<Timer> {
        self.0.upgrade().map(|inner| Timer { inner })
    }
}

impl Timer {
    /// Create an idle timer with a zero duration and no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a duration, see [`sanitize_duration`]
    pub fn sanitize_duration(value: &Value) -> Result<u64, TimerError> {
        sanitize_duration(value)
    }

    fn state(&self) -> MutexGuard<'_, TimerInner> {
        // The state is plain data and consistent at every unlock point
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn downgrade(&self) -> WeakTimer {
        WeakTimer(Arc::downgrade(&self.inner))
    }

    /// Register `listener` for `event`
    ///
    /// Listeners run in registration order; registering the same callback
    /// twice makes it run twice per emit.
    pub fn on<F>(&self, event: TimerEvent, listener: F)
    where
        F: Fn(&Timer, &[Value]) + Send + Sync + 'static,
    {
        let mut state = self.state();
        state.events.add(event, Arc::new(listener));
        debug!("Registered {} listener ({} total)", event, state.events.count(event));
    }

    /// Invoke every listener registered for `event` with `args`
    ///
    /// Emitting an event nobody listens to does nothing. Listeners added
    /// while the emit is in progress are not called until the next one.
    pub fn emit(&self, event: TimerEvent, args: &[Value]) {
        let listeners = self.state().events.listeners(event);
        debug!("Emitting {} to {} listener(s)", event, listeners.len());

        for listener in listeners {
            listener(self, args);
        }
    }

    /// Configure the countdown duration without starting or stopping the tick
    pub fn set_duration<V: Into<Value>>(&self, duration: V) -> Result<u64, TimerError> {
        let seconds = sanitize_duration(&duration.into())?;
        self.state().configure(seconds);
        debug!("Duration set to {}s", seconds);
        Ok(seconds)
    }

    /// Start counting down from the current duration
    ///
    /// Starting a running timer keeps its tick; only one tick is ever
    /// scheduled per timer.
    pub fn start(&self) {
        self.start_inner(None);
    }

    /// Configure `duration` and start counting down
    ///
    /// An invalid duration is rejected before anything changes and no
    /// `start` event is emitted.
    pub fn start_with<V: Into<Value>>(&self, duration: V) -> Result<u64, TimerError> {
        let seconds = sanitize_duration(&duration.into())?;
        self.start_inner(Some(seconds));
        Ok(seconds)
    }

    fn start_inner(&self, duration: Option<u64>) {
        let snapshot = {
            let mut state = self.state();
            if let Some(seconds) = duration {
                state.configure(seconds);
            }
            if state.tick.is_none() {
                let id = state.next_tick_id();
                state.tick = Some(spawn_tick(self, id));
            }
            state.snapshot()
        };

        info!("Timer started with {}s remaining", snapshot.current_duration);
        self.emit(TimerEvent::Start, &[]);
    }

    /// Handle one tick of the tick task scheduled under `id`
    ///
    /// Returns whether the task should keep ticking.
    pub(crate) fn on_interval(&self, id: TickId) -> bool {
        let remaining = {
            let mut state = self.state();
            if state.tick_id() != Some(id) {
                return false;
            }
            if state.current_duration == 0 {
                None
            } else {
                state.current_duration -= 1;
                Some(state.current_duration)
            }
        };

        let Some(remaining) = remaining else {
            debug!("{} fired on an expired countdown", id);
            self.stop();
            return false;
        };

        debug!("{}: {}s remaining", id, remaining);
        self.emit(TimerEvent::Interval, &[]);

        let expired = {
            let state = self.state();
            state.current_duration == 0 && state.tick.is_some()
        };
        if expired {
            info!("Countdown finished");
            self.stop();
        }

        self.id() == Some(id)
    }

    /// Cancel the tick and keep the remaining duration
    pub fn pause(&self) {
        let (tick, remaining) = {
            let mut state = self.state();
            (state.tick.take(), state.current_duration)
        };
        drop(tick);

        info!("Timer paused with {}s remaining", remaining);
        self.emit(TimerEvent::Pause, &[]);
    }

    /// Restore the configured duration
    ///
    /// A running timer gets a fresh tick so the next one fires a full period
    /// later. An idle timer stays idle.
    pub fn reset(&self) {
        let (replaced, initial) = {
            let mut state = self.state();
            state.current_duration = state.initial_duration;
            let replaced = if state.tick.is_some() {
                let id = state.next_tick_id();
                state.tick.replace(spawn_tick(self, id))
            } else {
                None
            };
            (replaced, state.initial_duration)
        };
        drop(replaced);

        info!("Timer reset to {}s", initial);
        self.emit(TimerEvent::Reset, &[]);
    }

    /// Cancel the tick and clear the remaining duration
    pub fn stop(&self) {
        let tick = {
            let mut state = self.state();
            state.current_duration = 0;
            state.tick.take()
        };
        drop(tick);

        info!("Timer stopped");
        self.emit(TimerEvent::Stop, &[]);
    }

    /// Pause a running timer or start an idle one
    pub fn toggle(&self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
        self.emit(TimerEvent::Toggle, &[]);
    }

    pub fn initial_duration(&self) -> u64 {
        self.state().initial_duration
    }

    pub fn current_duration(&self) -> u64 {
        self.state().current_duration
    }

    /// Handle of the active tick, `None` while idle
    pub fn id(&self) -> Option<TickId> {
        self.state().tick_id()
    }

    pub fn is_running(&self) -> bool {
        self.state().tick.is_some()
    }

    /// Number of listeners registered for `event`
    pub fn listener_count(&self, event: TimerEvent) -> usize {
        self.state().events.count(event)
    }

    /// Check if no listener is registered for any event
    pub fn has_no_listeners(&self) -> bool {
        self.state().events.is_empty()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.state().snapshot()
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Timer")
            .field("initial_duration", &state.initial_duration)
            .field("current_duration", &state.current_duration)
            .field("id", &state.tick_id())
            .field("events", &state.events)
            .finish()
    }
}
