//! Test fixtures and builders for issue records
//!
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::IssueRecord;

/// Builder for creating test IssueRecord instances.
///
/// # Example
/// ```ignore
/// let issue = IssueRecordBuilder::new("proj1:proj1:g", "f.cs")
///     .rule("S100")
///     .line(3)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct IssueRecordBuilder {
    module_key: String,
    file_path: String,
    rule_id: String,
    line: Option<u32>,
    message: String,
    hash: Option<String>,
    resolution: Option<String>,
}

impl IssueRecordBuilder {
    pub fn new(module_key: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            module_key: module_key.into(),
            file_path: file_path.into(),
            rule_id: "S100".to_string(),
            line: None,
            message: "Suppressed issue".to_string(),
            hash: None,
            resolution: Some("WONTFIX".to_string()),
        }
    }

    pub fn rule(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = rule_id.into();
        self
    }

    pub fn line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    pub fn build(self) -> IssueRecord {
        IssueRecord {
            file_path: self.file_path,
            module_key: self.module_key,
            rule_id: self.rule_id,
            line: self.line,
            message: self.message,
            hash: self.hash,
            resolution: self.resolution,
        }
    }
}

/// Shorthand for a record with default passthrough fields.
pub fn issue(module_key: &str, file_path: &str, rule_id: &str) -> IssueRecord {
    IssueRecordBuilder::new(module_key, file_path)
        .rule(rule_id)
        .build()
}
