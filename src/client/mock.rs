//! Mock suppressed-issue source for testing
//!
//! Responses are scripted per call so tests can model slow, failing or
//! out-of-order fetches without a server.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::{IssueRecord, SuppressedIssueSource};
use crate::error::RemoteError;

/// One scripted reply: wait `delay`, then return `result`.
#[derive(Debug, Clone)]
pub struct ScriptedReply {
    pub delay: Duration,
    pub result: Result<Vec<IssueRecord>, RemoteError>,
}

/// Tracks calls for test verification
#[derive(Default, Debug, Clone)]
pub struct CallLog {
    /// Number of fetches started
    pub fetches: usize,
    /// Fetches that observed their cancellation signal
    pub cancelled: usize,
    /// Project keys passed to each fetch, in call order
    pub project_keys: Vec<String>,
}

/// Mock source for testing.
///
/// # Example
/// ```ignore
/// let source = MockIssueSource::new()
///     .reply_after(Duration::from_secs(5), Ok(vec![issue]))
///     .await
///     .fail(RemoteError::Transport("down".into()))
///     .await;
/// ```
#[derive(Default)]
pub struct MockIssueSource {
    /// Replies consumed in order, one per fetch
    script: Arc<Mutex<VecDeque<ScriptedReply>>>,
    /// Reply used once the script runs dry
    fallback: Arc<Mutex<Option<ScriptedReply>>>,
    log: Arc<Mutex<CallLog>>,
}

impl MockIssueSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an immediate successful reply.
    pub async fn reply(self, issues: Vec<IssueRecord>) -> Self {
        self.reply_after(Duration::ZERO, Ok(issues)).await
    }

    /// Queue an immediate failure.
    pub async fn fail(self, error: RemoteError) -> Self {
        self.reply_after(Duration::ZERO, Err(error)).await
    }

    /// Queue a reply delivered after `delay`.
    pub async fn reply_after(
        self,
        delay: Duration,
        result: Result<Vec<IssueRecord>, RemoteError>,
    ) -> Self {
        self.script
            .lock()
            .await
            .push_back(ScriptedReply { delay, result });
        self
    }

    /// Reply returned for every fetch after the script is exhausted.
    /// Without one, an exhausted script answers with an empty list.
    pub async fn otherwise(
        self,
        delay: Duration,
        result: Result<Vec<IssueRecord>, RemoteError>,
    ) -> Self {
        self.set_otherwise(delay, result).await;
        self
    }

    /// Replace the fallback reply on a source that is already in use.
    pub async fn set_otherwise(
        &self,
        delay: Duration,
        result: Result<Vec<IssueRecord>, RemoteError>,
    ) {
        *self.fallback.lock().await = Some(ScriptedReply { delay, result });
    }

    /// Get the call log for verification in tests.
    pub async fn call_log(&self) -> CallLog {
        self.log.lock().await.clone()
    }

    async fn next_reply(&self) -> ScriptedReply {
        if let Some(reply) = self.script.lock().await.pop_front() {
            return reply;
        }
        self.fallback.lock().await.clone().unwrap_or(ScriptedReply {
            delay: Duration::ZERO,
            result: Ok(Vec::new()),
        })
    }
}

#[async_trait]
impl SuppressedIssueSource for MockIssueSource {
    async fn fetch_suppressed_issues(
        &self,
        project_key: &str,
        cancel: CancellationToken,
    ) -> Result<Vec<IssueRecord>, RemoteError> {
        {
            let mut log = self.log.lock().await;
            log.fetches += 1;
            log.project_keys.push(project_key.to_string());
        }

        let reply = self.next_reply().await;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.log.lock().await.cancelled += 1;
                Err(RemoteError::Cancelled)
            }
            _ = tokio::time::sleep(reply.delay) => reply.result,
        }
    }
}
