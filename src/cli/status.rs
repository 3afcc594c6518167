//! Status command implementation

use colored::Colorize;

use suppressor::Result;
use suppressor::config::Config;

use crate::cli::GlobalOptions;
use crate::cli::context::load_config;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Suppressor Configuration Status".bold());

    let config = match load_config(opts) {
        Ok(config) => config,
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Create {} or pass {}.",
                "~/.suppressor/config.yaml".cyan(),
                "--project".cyan()
            );
            println!();
            return Ok(());
        }
    };

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!("Config file: {}", config_path.display().to_string().cyan());
    println!();

    match config.require_project_key() {
        Ok(key) => println!("{} Project: {}", "✓".green(), key),
        Err(_) => {
            println!("{} Project key not configured", "✗".red());
            println!("  → Set project_key or pass --project");
        }
    }

    match config.issues_file.as_deref() {
        Some(path) if path.exists() => {
            println!("{} Issues file: {}", "✓".green(), path.display())
        }
        Some(path) => println!(
            "{} Issues file missing: {} (refreshes will fail)",
            "⚠".yellow(),
            path.display()
        ),
        None => {
            println!("{} Issues file not configured", "✗".red());
            println!("  → Set issues_file or pass --issues");
        }
    }

    println!(
        "{} Module key format: {}",
        "○".dimmed(),
        config.module_key_format
    );
    println!(
        "{} Refresh every {}s, first snapshot wait {}s",
        "○".dimmed(),
        config.refresh_interval_secs,
        config.first_snapshot_timeout_secs
    );
    if opts.offline {
        println!("{} Offline: refreshes are skipped", "⚠".yellow());
    }

    if let Err(err) = config.validate() {
        println!();
        println!("{} {}", "✗".red(), err);
    }
    println!();

    Ok(())
}
