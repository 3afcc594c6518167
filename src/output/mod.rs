//! Output formatting for CLI results

use suppressor::{IssueRecord, Result};

use crate::cli::OutputFormat;

pub mod display;
pub mod json;
pub mod table;

use display::IssueDisplay;

/// Format and print issue records to stdout
pub fn print_issues(issues: &[IssueRecord], format: OutputFormat) -> Result<()> {
    let output = match format {
        OutputFormat::Table => {
            let rows: Vec<IssueDisplay> = issues.iter().map(IssueDisplay::from).collect();
            table::format_table(&rows)
        }
        OutputFormat::Json => json::format_json(issues)?,
    };
    println!("{}", output);
    Ok(())
}
