//! Refresh coordination
//!
//! At most one refresh is current at a time. Starting a refresh cancels its
//! predecessor, and a result is only published if the refresh that produced it
//! is still the active one when it returns. The active token and the published
//! snapshot are both guarded by the same lock, so an older, slower fetch can
//! never overwrite a newer one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use super::snapshot::Snapshot;
use crate::client::{ConnectionState, IssueRecord, SuppressedIssueSource};
use crate::error::RemoteError;

/// Result of one refresh attempt.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// The refresh completed and its snapshot is now current
    Published(Arc<Snapshot>),
    /// The session was not connected; nothing was fetched
    Skipped,
    /// The source failed; the previous snapshot is kept
    Failed(RemoteError),
    /// Superseded by a newer refresh, or the cache was closed
    Cancelled,
}

impl RefreshOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, RefreshOutcome::Published(_))
    }

    pub(crate) fn log(&self, origin: &str) {
        match self {
            RefreshOutcome::Published(snapshot) => log::debug!(
                "{} refresh published generation {} ({} issues)",
                origin,
                snapshot.generation(),
                snapshot.len()
            ),
            RefreshOutcome::Skipped => log::debug!("{} refresh skipped: not connected", origin),
            RefreshOutcome::Failed(err) => log::warn!("{} refresh failed: {}", origin, err),
            RefreshOutcome::Cancelled => log::debug!("{} refresh cancelled", origin),
        }
    }
}

/// One in-flight refresh attempt.
#[derive(Debug, Clone)]
struct RefreshToken {
    generation: u64,
    cancel: CancellationToken,
}

#[derive(Debug, Default)]
struct RefreshState {
    last_generation: u64,
    active: Option<RefreshToken>,
}

/// What happened when a refresh was requested.
pub enum RefreshStart {
    /// A new refresh is now active; drive it with [`PendingRefresh::run`]
    Started(PendingRefresh),
    /// Another refresh is already in flight and was left running
    InFlight,
    /// A snapshot is already published; nothing to warm up
    Warm,
    /// No refresh was started
    Rejected(RefreshOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartMode {
    Supersede,
    IfCold,
}

/// Serializes refreshes of one project and publishes their snapshots.
pub struct RefreshCoordinator {
    project_key: String,
    source: Arc<dyn SuppressedIssueSource>,
    connection: Arc<dyn ConnectionState>,
    state: Mutex<RefreshState>,
    /// Parent of every refresh token; cancelled once on close
    closed: CancellationToken,
    published: watch::Sender<Option<Arc<Snapshot>>>,
}

impl RefreshCoordinator {
    pub fn new(
        project_key: impl Into<String>,
        source: Arc<dyn SuppressedIssueSource>,
        connection: Arc<dyn ConnectionState>,
    ) -> Self {
        let (published, _) = watch::channel(None);
        Self {
            project_key: project_key.into(),
            source,
            connection,
            state: Mutex::new(RefreshState::default()),
            closed: CancellationToken::new(),
            published,
        }
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    /// The current snapshot, if any refresh has ever been published.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.published.borrow().clone()
    }

    /// Receiver notified on every publication.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.published.subscribe()
    }

    pub fn is_refreshing(&self) -> bool {
        self.lock_state().active.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Resolves once [`close`](Self::close) has been called.
    pub fn wait_closed(&self) -> WaitForCancellationFuture<'_> {
        self.closed.cancelled()
    }

    /// Start a refresh, superseding any in flight, and drive it to completion.
    pub async fn refresh(self: &Arc<Self>) -> RefreshOutcome {
        match self.start() {
            RefreshStart::Started(pending) => pending.run().await,
            RefreshStart::Rejected(outcome) => outcome,
            // start() always supersedes
            RefreshStart::InFlight | RefreshStart::Warm => RefreshOutcome::Cancelled,
        }
    }

    /// Make a new refresh the active one, cancelling its predecessor.
    pub fn start(self: &Arc<Self>) -> RefreshStart {
        self.begin(StartMode::Supersede)
    }

    /// Start a refresh only while no snapshot has been published and none is
    /// in flight. Used to warm the cache without cancelling a refresh that is
    /// already on its way.
    pub fn start_if_cold(self: &Arc<Self>) -> RefreshStart {
        self.begin(StartMode::IfCold)
    }

    fn begin(self: &Arc<Self>, mode: StartMode) -> RefreshStart {
        if !self.connection.is_connected() {
            return RefreshStart::Rejected(RefreshOutcome::Skipped);
        }

        let mut state = self.lock_state();
        if self.closed.is_cancelled() {
            return RefreshStart::Rejected(RefreshOutcome::Cancelled);
        }
        if mode == StartMode::IfCold {
            if state.active.is_some() {
                return RefreshStart::InFlight;
            }
            if self.published.borrow().is_some() {
                return RefreshStart::Warm;
            }
        }
        if let Some(previous) = state.active.take() {
            log::debug!("Superseding refresh generation {}", previous.generation);
            previous.cancel.cancel();
        }

        state.last_generation += 1;
        let token = RefreshToken {
            generation: state.last_generation,
            cancel: self.closed.child_token(),
        };
        state.active = Some(token.clone());
        log::debug!(
            "Starting refresh generation {} for {}",
            token.generation,
            self.project_key
        );

        RefreshStart::Started(PendingRefresh {
            coordinator: Arc::clone(self),
            token,
        })
    }

    /// Publish `issues` if `token` is still the active refresh.
    fn publish(&self, token: &RefreshToken, issues: Vec<IssueRecord>) -> RefreshOutcome {
        let mut state = self.lock_state();
        let is_active = state
            .active
            .as_ref()
            .is_some_and(|active| active.generation == token.generation);
        if !is_active || token.cancel.is_cancelled() {
            return RefreshOutcome::Cancelled;
        }

        state.active = None;
        let snapshot = Arc::new(Snapshot::new(token.generation, issues));
        self.published.send_replace(Some(Arc::clone(&snapshot)));
        log::info!(
            "Cached {} suppressed issues for {} (generation {})",
            snapshot.len(),
            self.project_key,
            snapshot.generation()
        );
        RefreshOutcome::Published(snapshot)
    }

    /// Drop `generation` if it is still active, cancelling its signal.
    fn retire(&self, generation: u64) {
        let mut state = self.lock_state();
        if state
            .active
            .as_ref()
            .is_some_and(|active| active.generation == generation)
            && let Some(token) = state.active.take()
        {
            token.cancel.cancel();
        }
    }

    /// Cancel the active refresh and refuse new ones. Returns false if
    /// already closed.
    pub fn close(&self) -> bool {
        let mut state = self.lock_state();
        if self.closed.is_cancelled() {
            return false;
        }
        self.closed.cancel();
        state.active = None;
        true
    }

    fn lock_state(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An active refresh that has not fetched yet.
///
/// Dropping it without running (or mid-run) retires its generation, so an
/// aborted task never leaves a stale "refreshing" marker behind.
pub struct PendingRefresh {
    coordinator: Arc<RefreshCoordinator>,
    token: RefreshToken,
}

impl PendingRefresh {
    pub fn generation(&self) -> u64 {
        self.token.generation
    }

    /// Fetch from the source and publish if still current.
    pub async fn run(self) -> RefreshOutcome {
        let coordinator = &self.coordinator;
        let cancel = &self.token.cancel;

        // Poll the source first so it can observe the cancellation itself;
        // the second arm covers sources that ignore the signal.
        let fetched = tokio::select! {
            biased;
            result = coordinator
                .source
                .fetch_suppressed_issues(&coordinator.project_key, cancel.clone()) => result,
            _ = cancel.cancelled() => Err(RemoteError::Cancelled),
        };

        match fetched {
            Ok(issues) => coordinator.publish(&self.token, issues),
            Err(err) if err.is_cancelled() || cancel.is_cancelled() => {
                log::debug!(
                    "Refresh generation {} dropped after cancellation",
                    self.token.generation
                );
                RefreshOutcome::Cancelled
            }
            Err(err) => RefreshOutcome::Failed(err),
        }
    }
}

impl Drop for PendingRefresh {
    fn drop(&mut self) {
        self.coordinator.retire(self.token.generation);
    }
}
