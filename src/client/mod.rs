//! Remote collaborators consumed by the suppressed-issue cache
//!
//! The cache never talks to the network itself. It depends on two seams:
//! a [`ConnectionState`] it consults before refreshing, and a
//! [`SuppressedIssueSource`] that returns every suppressed issue of a project.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::RemoteError;

#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod recorded;

#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockIssueSource;
pub use models::IssueRecord;
pub use recorded::RecordedIssueSource;

/// Whether the remote session is currently usable.
///
/// Consulted before every refresh, never mutated by the cache.
pub trait ConnectionState: Send + Sync {
    fn is_connected(&self) -> bool;
}

impl ConnectionState for AtomicBool {
    fn is_connected(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

/// Source of suppressed (resolved or ignored) issues for a project.
#[async_trait]
pub trait SuppressedIssueSource: Send + Sync {
    /// Fetch the full list of suppressed issues for `project_key`.
    ///
    /// Implementations should abort with [`RemoteError::Cancelled`] as soon as
    /// `cancel` fires; the coordinator also stops polling the call at that point.
    async fn fetch_suppressed_issues(
        &self,
        project_key: &str,
        cancel: CancellationToken,
    ) -> Result<Vec<IssueRecord>, RemoteError>;
}

/// Shared connected/disconnected flag for a remote session.
#[derive(Debug, Clone)]
pub struct Session {
    connected: Arc<AtomicBool>,
}

impl Session {
    /// Create a session in the given state.
    pub fn new(connected: bool) -> Self {
        Self {
            connected: Arc::new(AtomicBool::new(connected)),
        }
    }

    pub fn connect(&self) {
        self.connected.store(true, Ordering::Release);
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::Release);
    }
}

impl ConnectionState for Session {
    fn is_connected(&self) -> bool {
        self.connected.is_connected()
    }
}
