//! Snapshot command implementation

use colored::Colorize;

use suppressor::Result;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::output::{self, json};

/// Wait for the first snapshot and print every record in it
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let snapshot = ctx.cache.wait_for_snapshot().await;
    ctx.cache.close();

    let Some(snapshot) = snapshot else {
        eprintln!(
            "{} No snapshot published for {}",
            "⚠".yellow(),
            ctx.cache.project_key()
        );
        return output::print_issues(&[], ctx.format);
    };

    match ctx.format {
        OutputFormat::Table => {
            println!(
                "Snapshot #{} of {} ({} issues, fetched {})",
                snapshot.generation(),
                ctx.cache.project_key().bold(),
                snapshot.len(),
                snapshot.fetched_at().format("%Y-%m-%dT%H:%M:%SZ")
            );
            output::print_issues(snapshot.issues(), ctx.format)
        }
        OutputFormat::Json => {
            println!(
                "{}",
                json::format_snapshot_json(ctx.cache.project_key(), &snapshot)?
            );
            Ok(())
        }
    }
}
