//! Replay of a recorded suppressed-issues response
//!
//! Lets the cache run without a live server: every fetch re-reads a JSON file
//! captured from an earlier session (or written by `suppressor snapshot --format json`).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::{IssueRecord, SuppressedIssueSource};
use crate::error::RemoteError;

/// Accepted file shapes: a bare issue array, or the `{ data, meta }` envelope
/// produced by this crate's JSON output.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordedResponse {
    Bare(Vec<IssueRecord>),
    Envelope { data: Vec<IssueRecord> },
}

impl RecordedResponse {
    fn into_issues(self) -> Vec<IssueRecord> {
        match self {
            RecordedResponse::Bare(issues) => issues,
            RecordedResponse::Envelope { data } => data,
        }
    }
}

/// Suppressed-issue source backed by a recorded JSON response on disk.
#[derive(Debug, Clone)]
pub struct RecordedIssueSource {
    path: PathBuf,
}

impl RecordedIssueSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a recorded response body.
    pub fn parse(contents: &str) -> Result<Vec<IssueRecord>, RemoteError> {
        serde_json::from_str::<RecordedResponse>(contents)
            .map(RecordedResponse::into_issues)
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl SuppressedIssueSource for RecordedIssueSource {
    async fn fetch_suppressed_issues(
        &self,
        project_key: &str,
        cancel: CancellationToken,
    ) -> Result<Vec<IssueRecord>, RemoteError> {
        log::debug!(
            "Replaying suppressed issues for {} from {}",
            project_key,
            self.path.display()
        );

        let contents = tokio::select! {
            _ = cancel.cancelled() => return Err(RemoteError::Cancelled),
            read = tokio::fs::read_to_string(&self.path) => read.map_err(|e| {
                RemoteError::Transport(format!("{}: {}", self.path.display(), e))
            })?,
        };

        if cancel.is_cancelled() {
            return Err(RemoteError::Cancelled);
        }

        let issues = Self::parse(&contents)?;
        log::debug!("Recorded response holds {} issues", issues.len());
        Ok(issues)
    }
}
