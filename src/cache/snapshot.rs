//! Immutable, generation-stamped result of one refresh

use chrono::{DateTime, Utc};

use crate::client::IssueRecord;

/// Fully populated result of a refresh that ran to completion.
///
/// A refresh never mutates an existing snapshot; it publishes a new one.
#[derive(Debug, Clone)]
pub struct Snapshot {
    generation: u64,
    fetched_at: DateTime<Utc>,
    issues: Vec<IssueRecord>,
}

impl Snapshot {
    pub(crate) fn new(generation: u64, issues: Vec<IssueRecord>) -> Self {
        Self {
            generation,
            fetched_at: Utc::now(),
            issues,
        }
    }

    /// Generation of the refresh that produced this snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn issues(&self) -> &[IssueRecord] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues for `module_key` and `file_path`, in stored order.
    pub fn matching<'a>(
        &'a self,
        module_key: &'a str,
        file_path: &'a str,
    ) -> impl Iterator<Item = &'a IssueRecord> + 'a {
        self.issues
            .iter()
            .filter(move |issue| issue.matches(module_key, file_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::issue;

    #[test]
    fn test_matching_keeps_stored_order() {
        let snapshot = Snapshot::new(
            3,
            vec![
                issue("p:p:g", "a.cs", "S3"),
                issue("p:p:g", "b.cs", "S2"),
                issue("P:P:G", "A.CS", "S1"),
            ],
        );

        let rules: Vec<_> = snapshot
            .matching("p:p:g", "a.cs")
            .map(|i| i.rule_id.as_str())
            .collect();

        assert_eq!(rules, vec!["S3", "S1"]);
        assert_eq!(snapshot.generation(), 3);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::new(1, Vec::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.matching("p:p:g", "a.cs").count(), 0);
    }
}
