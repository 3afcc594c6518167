//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

use suppressor::Snapshot;

/// Wrapper for JSON output with metadata.
///
/// `snapshot --format json` output in this shape can be replayed as a
/// recorded issues file.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Project the data was cached for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,

    /// Generation of the snapshot the data came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<u64>,

    /// When that snapshot was fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                project_key: None,
                generation: None,
                fetched_at: None,
            },
        }
    }

    /// Attach the provenance of a cached snapshot.
    pub fn with_snapshot(mut self, project_key: &str, snapshot: &Snapshot) -> Self {
        self.meta.project_key = Some(project_key.to_string());
        self.meta.generation = Some(snapshot.generation());
        self.meta.fetched_at = Some(snapshot.fetched_at().to_rfc3339());
        self
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Format every record of `snapshot` as pretty-printed JSON with provenance
pub fn format_snapshot_json(
    project_key: &str,
    snapshot: &Snapshot,
) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(snapshot.issues()).with_snapshot(project_key, snapshot);
    serde_json::to_string_pretty(&output)
}
