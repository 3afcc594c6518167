//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Shown instead of an empty table
pub const EMPTY_MESSAGE: &str = "No suppressed issues found.";

/// Format rows as a rounded table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::display::IssueDisplay;

    fn row(file_path: &str, rule_id: &str) -> IssueDisplay {
        IssueDisplay {
            file_path: file_path.to_string(),
            module_key: "p:p:g".to_string(),
            rule_id: rule_id.to_string(),
            line: "--".to_string(),
            resolution: "FIXED".to_string(),
            message: String::new(),
        }
    }

    #[test]
    fn test_format_table_empty() {
        let rows: Vec<IssueDisplay> = vec![];
        assert_eq!(format_table(&rows), EMPTY_MESSAGE);
    }

    #[test]
    fn test_format_table_headers_and_rows() {
        let result = format_table(&[row("src/a.cs", "S100"), row("src/b.cs", "S200")]);

        assert!(result.contains("FILE"));
        assert!(result.contains("RULE"));
        assert!(result.contains("src/a.cs"));
        assert!(result.contains("S200"));
    }

    #[test]
    fn test_format_table_uses_rounded_style() {
        let result = format_table(&[row("a.cs", "S1")]);

        // Rounded style uses ╭ for top-left corner
        assert!(result.contains("╭"));
        assert!(result.contains("╰"));
    }
}
