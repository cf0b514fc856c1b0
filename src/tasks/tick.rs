//! Periodic tick task

use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

use crate::{state::TickId, timer::Timer};

/// Time between two ticks of a running timer
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Ownership of a scheduled tick task
///
/// The task is aborted when the handle is dropped, so clearing or replacing
/// the handle is enough to guarantee no further ticks fire.
#[derive(Debug)]
pub struct TickHandle {
    id: TickId,
    task: JoinHandle<()>,
}

impl TickHandle {
    pub fn id(&self) -> TickId {
        self.id
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        debug!("Cancelling {}", self.id);
        self.task.abort();
    }
}

/// Spawn the tick task for `timer`
///
/// The first tick fires one period after scheduling. The task only keeps a
/// weak reference to the timer and ends once every handle to it is gone, or
/// once the timer no longer runs under `id`.
///
/// # Panics
///
/// Panics when called outside of a Tokio runtime.
pub(crate) fn spawn_tick(timer: &Timer, id: TickId) -> TickHandle {
    let weak = timer.downgrade();

    let task = tokio::spawn(async move {
        debug!("Starting {}", id);
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

        loop {
            interval.tick().await;

            let Some(timer) = weak.upgrade() else {
                debug!("Timer dropped, ending {}", id);
                break;
            };

            if !timer.on_interval(id) {
                break;
            }
        }
    });

    TickHandle { id, task }
}
