//! Issue data returned by the code-quality server

use serde::{Deserialize, Serialize};

/// One suppressed or resolved issue as reported by the server.
///
/// Only `file_path` and `module_key` are interpreted by the cache; every other
/// field is passed through to callers untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    /// Path of the file the issue was raised on, as reported by the server
    pub file_path: String,

    /// Server-side module key (e.g. "project:project:guid")
    pub module_key: String,

    /// Rule identifier (e.g. "S100")
    #[serde(default)]
    pub rule_id: String,

    /// 1-based line number, absent for file-level issues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Issue message
    #[serde(default)]
    pub message: String,

    /// Line hash used by the server to track the issue across edits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Resolution reported by the server: FIXED, WONTFIX, FALSE-POSITIVE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

impl IssueRecord {
    /// Case-insensitive exact match on module key and file path.
    ///
    /// No path normalization is applied: separators and relative segments
    /// must already agree.
    pub fn matches(&self, module_key: &str, file_path: &str) -> bool {
        eq_ignore_case(&self.module_key, module_key) && eq_ignore_case(&self.file_path, file_path)
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(module_key: &str, file_path: &str) -> IssueRecord {
        IssueRecord {
            file_path: file_path.to_string(),
            module_key: module_key.to_string(),
            rule_id: "S100".to_string(),
            line: Some(1),
            message: String::new(),
            hash: None,
            resolution: None,
        }
    }

    #[test]
    fn test_matches_ignores_case() {
        let issue = record("mod:mod:g1", "c:\\A.CS");
        assert!(issue.matches("MOD:MOD:g1", "C:\\a.cs"));
    }

    #[test]
    fn test_matches_is_exact_otherwise() {
        let issue = record("mod:mod:g1", "c:\\a.cs");
        assert!(!issue.matches("mod:mod:g", "c:\\a.cs"));
        assert!(!issue.matches("mod:mod:g1", "c:/a.cs"));
        assert!(!issue.matches("mod:mod:g1", "c:\\dir\\..\\a.cs"));
        assert!(!issue.matches("", ""));
    }

    #[test]
    fn test_matches_non_ascii_paths() {
        let issue = record("p:p:g", "src/Ünïcode.cs");
        assert!(issue.matches("P:P:G", "SRC/ünÏCODE.CS"));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "filePath": "src/a.cs",
            "moduleKey": "p:p:g",
            "ruleId": "csharpsquid:S101",
            "line": 12,
            "message": "Rename class",
            "resolution": "WONTFIX"
        }"#;

        let issue: IssueRecord = serde_json::from_str(json).unwrap();
        assert_eq!(issue.file_path, "src/a.cs");
        assert_eq!(issue.rule_id, "csharpsquid:S101");
        assert_eq!(issue.line, Some(12));
        assert_eq!(issue.resolution.as_deref(), Some("WONTFIX"));
        assert!(issue.hash.is_none());
    }

    #[test]
    fn test_deserialize_defaults_passthrough_fields() {
        let json = r#"{ "filePath": "a.cs", "moduleKey": "p:p:g" }"#;
        let issue: IssueRecord = serde_json::from_str(json).unwrap();
        assert!(issue.rule_id.is_empty());
        assert!(issue.line.is_none());
        assert!(issue.message.is_empty());
    }
}
