//! Read side and lifecycle of the suppressed-issue cache

use std::sync::Arc;
use std::time::Duration;

use super::coordinator::{RefreshCoordinator, RefreshOutcome};
use super::key::ModuleKeyFormat;
use super::scheduler::RefreshScheduler;
use super::snapshot::Snapshot;
use super::CacheOptions;
use crate::client::{ConnectionState, IssueRecord, SuppressedIssueSource};

/// Suppressed issues of one bound project.
///
/// Reads are served from the current snapshot and never fail. Until the first
/// snapshot is published a read waits (bounded by `first_snapshot_timeout`)
/// and then degrades to "no known suppressions".
///
/// Instances are fully independent; nothing is shared between caches bound
/// to different projects.
pub struct SuppressedIssueCache {
    coordinator: Arc<RefreshCoordinator>,
    scheduler: RefreshScheduler,
    key_format: ModuleKeyFormat,
    first_snapshot_timeout: Duration,
}

impl SuppressedIssueCache {
    /// Bind a cache to `project_key`, request an immediate refresh and start
    /// the periodic schedule.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn new(
        project_key: impl Into<String>,
        source: Arc<dyn SuppressedIssueSource>,
        connection: Arc<dyn ConnectionState>,
        options: CacheOptions,
    ) -> Self {
        let coordinator = Arc::new(RefreshCoordinator::new(project_key, source, connection));
        let scheduler = RefreshScheduler::new(Arc::clone(&coordinator), options.refresh_interval);

        // Avoid an empty cache until the first tick
        scheduler.request();
        scheduler.start();

        log::debug!(
            "Suppressed-issue cache bound to {}",
            coordinator.project_key()
        );

        Self {
            coordinator,
            scheduler,
            key_format: options.module_key_format,
            first_snapshot_timeout: options.first_snapshot_timeout,
        }
    }

    pub fn project_key(&self) -> &str {
        self.coordinator.project_key()
    }

    /// Module key for a local project id, rendered with the configured format.
    pub fn module_key(&self, module: &str) -> String {
        self.key_format.build(self.project_key(), module)
    }

    /// Suppressed issues for `module_key` and `file_path`, in snapshot order.
    ///
    /// Both fields compare case-insensitively and otherwise exactly.
    pub async fn query(&self, module_key: &str, file_path: &str) -> Vec<IssueRecord> {
        match self.wait_for_snapshot().await {
            Some(snapshot) => snapshot.matching(module_key, file_path).cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Like [`query`](Self::query), with the module key built from a local
    /// project id.
    pub async fn query_project(&self, module: &str, file_path: &str) -> Vec<IssueRecord> {
        let module_key = self.module_key(module);
        self.query(&module_key, file_path).await
    }

    /// Current snapshot without waiting.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.coordinator.current()
    }

    /// Current snapshot, or the first one published within the wait policy.
    ///
    /// A cold read triggers a refresh unless one is already in flight. After
    /// `close()` it never waits or refreshes.
    pub async fn wait_for_snapshot(&self) -> Option<Arc<Snapshot>> {
        if let Some(snapshot) = self.coordinator.current() {
            return Some(snapshot);
        }
        if self.coordinator.is_closed() {
            return None;
        }

        let mut published = self.coordinator.subscribe();
        self.scheduler.request();

        let first = async {
            tokio::select! {
                changed = published.wait_for(Option::is_some) => {
                    changed.ok().and_then(|snapshot| (*snapshot).clone())
                }
                _ = self.coordinator.wait_closed() => None,
            }
        };

        match tokio::time::timeout(self.first_snapshot_timeout, first).await {
            Ok(snapshot) => snapshot,
            Err(_) => {
                log::warn!(
                    "No suppressed issues cached for {} after {:?}; assuming none",
                    self.project_key(),
                    self.first_snapshot_timeout
                );
                None
            }
        }
    }

    /// Refresh now, superseding any refresh in flight, and report the outcome.
    pub async fn refresh_now(&self) -> RefreshOutcome {
        let outcome = self.coordinator.refresh().await;
        outcome.log("Manual");
        outcome
    }

    pub fn is_refreshing(&self) -> bool {
        self.coordinator.is_refreshing()
    }

    pub fn is_closed(&self) -> bool {
        self.coordinator.is_closed()
    }

    /// Stop the schedule and cancel any refresh in flight.
    ///
    /// Idempotent; returns true only for the call that closed the cache. Reads
    /// keep answering from the last published snapshot.
    pub fn close(&self) -> bool {
        self.scheduler.stop();
        let closed = self.coordinator.close();
        if closed {
            log::debug!("Suppressed-issue cache for {} closed", self.project_key());
        }
        closed
    }
}

impl Drop for SuppressedIssueCache {
    fn drop(&mut self) {
        self.close();
    }
}
