//! Periodic refresh trigger
//!
//! Ticks and one-off requests both go through the coordinator, and both pass a
//! stop gate first. `stop()` takes the same gate, so once it returns no tick
//! can begin another refresh, even one that fired concurrently on another
//! worker thread.
//!
//! Each started refresh runs in its own task, so a slow or hung fetch never
//! holds up the next tick; that tick supersedes it instead.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::coordinator::{RefreshCoordinator, RefreshStart};

type TaskSlot = Mutex<Option<JoinHandle<()>>>;

/// Fires refreshes on a fixed period until stopped.
pub struct RefreshScheduler {
    coordinator: Arc<RefreshCoordinator>,
    period: Duration,
    /// Set once by `stop()`; checked before every refresh is started
    stopped: Arc<Mutex<bool>>,
    ticker: TaskSlot,
    /// Task driving the most recently started refresh
    in_flight: Arc<TaskSlot>,
}

impl RefreshScheduler {
    /// Create a scheduler. Nothing fires until [`start`](Self::start).
    pub fn new(coordinator: Arc<RefreshCoordinator>, period: Duration) -> Self {
        Self {
            coordinator,
            period,
            stopped: Arc::new(Mutex::new(false)),
            ticker: Mutex::new(None),
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Begin ticking. The first tick fires one full period from now, then
    /// every period after that regardless of how long refreshes take.
    ///
    /// Returns false if already started or stopped.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) -> bool {
        if *lock(&self.stopped) {
            return false;
        }
        let mut ticker = lock(&self.ticker);
        if ticker.is_some() {
            return false;
        }

        let coordinator = Arc::clone(&self.coordinator);
        let stopped = Arc::clone(&self.stopped);
        let in_flight = Arc::clone(&self.in_flight);
        let period = self.period;

        *ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let fired = gated(&stopped, || {
                    launch(coordinator.start(), &in_flight, "Scheduled");
                });
                if fired.is_none() {
                    break;
                }
            }
        }));

        log::debug!("Refresh scheduler started (every {:?})", self.period);
        true
    }

    /// Request a refresh now if the cache is still cold: no snapshot yet and
    /// none in flight. An in-flight refresh is joined, never cancelled.
    /// Ignored after `stop()`.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn request(&self) {
        gated(&self.stopped, || {
            launch(self.coordinator.start_if_cold(), &self.in_flight, "Requested");
        });
    }

    /// Stop ticking and abort the refresh task in flight. Idempotent; returns
    /// true only for the call that stopped it.
    pub fn stop(&self) -> bool {
        {
            let mut stopped = lock(&self.stopped);
            if *stopped {
                return false;
            }
            *stopped = true;
        }

        for slot in [&self.ticker, &*self.in_flight] {
            if let Some(handle) = lock(slot).take() {
                handle.abort();
            }
        }
        log::debug!("Refresh scheduler stopped");
        true
    }

    pub fn is_stopped(&self) -> bool {
        *lock(&self.stopped)
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run `f` unless the scheduler has been stopped, holding the gate for its
/// whole (synchronous) duration.
fn gated<T>(stopped: &Mutex<bool>, f: impl FnOnce() -> T) -> Option<T> {
    let stopped = lock(stopped);
    if *stopped { None } else { Some(f()) }
}

/// Drive a started refresh on its own task and remember that task.
fn launch(start: RefreshStart, slot: &TaskSlot, origin: &'static str) {
    match start {
        RefreshStart::Started(pending) => {
            let run = tokio::spawn(async move { pending.run().await.log(origin) });
            // Any task already in the slot drives a refresh that was just
            // superseded or has finished; it winds down on its own.
            *lock(slot) = Some(run);
        }
        RefreshStart::Rejected(outcome) => outcome.log(origin),
        RefreshStart::InFlight | RefreshStart::Warm => {}
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
