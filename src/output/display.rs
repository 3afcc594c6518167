//! Display models for issue tables

use tabled::Tabled;

use suppressor::IssueRecord;

const MESSAGE_WIDTH: usize = 60;

/// Issue row for table display
#[derive(Debug, Clone, Tabled)]
pub struct IssueDisplay {
    #[tabled(rename = "FILE")]
    pub file_path: String,

    #[tabled(rename = "MODULE")]
    pub module_key: String,

    #[tabled(rename = "RULE")]
    pub rule_id: String,

    #[tabled(rename = "LINE")]
    pub line: String,

    #[tabled(rename = "RESOLUTION")]
    pub resolution: String,

    #[tabled(rename = "MESSAGE")]
    pub message: String,
}

impl From<&IssueRecord> for IssueDisplay {
    fn from(issue: &IssueRecord) -> Self {
        Self {
            file_path: issue.file_path.clone(),
            module_key: issue.module_key.clone(),
            rule_id: issue.rule_id.clone(),
            line: issue
                .line
                .map(|line| line.to_string())
                .unwrap_or_else(|| "--".to_string()),
            resolution: issue.resolution.clone().unwrap_or_else(|| "--".to_string()),
            message: truncate_string(&issue.message, MESSAGE_WIDTH),
        }
    }
}

/// Truncate string to `max_chars` characters with ellipsis
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_from_record() {
        let record = IssueRecord {
            file_path: "src/a.cs".to_string(),
            module_key: "p:p:g".to_string(),
            rule_id: "S100".to_string(),
            line: Some(12),
            message: "Rename this method".to_string(),
            hash: None,
            resolution: Some("WONTFIX".to_string()),
        };

        let row = IssueDisplay::from(&record);

        assert_eq!(row.line, "12");
        assert_eq!(row.resolution, "WONTFIX");
        assert_eq!(row.message, "Rename this method");
    }

    #[test]
    fn test_display_placeholders() {
        let record = IssueRecord {
            file_path: "a.cs".to_string(),
            module_key: "p:p:g".to_string(),
            rule_id: String::new(),
            line: None,
            message: String::new(),
            hash: None,
            resolution: None,
        };

        let row = IssueDisplay::from(&record);

        assert_eq!(row.line, "--");
        assert_eq!(row.resolution, "--");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("abcdefghijkl", 8), "abcde...");
        // Multi-byte characters are never split
        assert_eq!(truncate_string("ééééééé", 5), "éé...");
    }
}
