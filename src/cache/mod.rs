//! Suppressed-issue cache
//!
//! Holds a point-in-time snapshot of the issues a server has suppressed for
//! one project, refreshes it periodically and on demand, and answers
//! per-file queries from whatever snapshot is current.

pub mod coordinator;
pub mod key;
pub mod provider;
pub mod scheduler;
pub mod snapshot;

use std::time::Duration;

/// Refresh and wait policies.
pub struct CacheTiming;

impl CacheTiming {
    /// Period between background refreshes
    pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10 * 60); // 10 min

    /// How long a read waits for the very first snapshot
    pub const FIRST_SNAPSHOT_WAIT: Duration = Duration::from_secs(30); // 30 sec
}

/// Construction options for [`SuppressedIssueCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    pub refresh_interval: Duration,
    pub first_snapshot_timeout: Duration,
    pub module_key_format: ModuleKeyFormat,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            refresh_interval: CacheTiming::REFRESH_INTERVAL,
            first_snapshot_timeout: CacheTiming::FIRST_SNAPSHOT_WAIT,
            module_key_format: ModuleKeyFormat::default(),
        }
    }
}

// Re-export main types
pub use coordinator::{PendingRefresh, RefreshCoordinator, RefreshOutcome, RefreshStart};
pub use key::ModuleKeyFormat;
pub use provider::SuppressedIssueCache;
pub use scheduler::RefreshScheduler;
pub use snapshot::Snapshot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = CacheOptions::default();
        assert_eq!(options.refresh_interval, Duration::from_secs(600));
        assert_eq!(options.first_snapshot_timeout, Duration::from_secs(30));
        assert_eq!(
            options.module_key_format.template(),
            ModuleKeyFormat::DEFAULT_TEMPLATE
        );
    }
}
