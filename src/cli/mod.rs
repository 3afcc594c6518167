//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod query;
pub mod snapshot;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;
pub use query::QueryTargetArgs;

/// Suppressor - inspect the suppressed issues cached for a project
#[derive(Parser, Debug)]
#[command(name = "suppressor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "SUPPRESSOR_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "SUPPRESSOR_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the bound project key
    #[arg(long, global = true, env = "SUPPRESSOR_PROJECT", hide_env = true)]
    pub project: Option<String>,

    /// Override the recorded issues file
    #[arg(long, global = true, env = "SUPPRESSOR_ISSUES", hide_env = true)]
    pub issues: Option<String>,

    /// Treat the session as disconnected (no refresh runs)
    #[arg(long, global = true, env = "SUPPRESSOR_OFFLINE", hide_env = true)]
    pub offline: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "SUPPRESSOR_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List suppressed issues for one file
    Query {
        /// File path as reported by the server (case-insensitive)
        file_path: String,

        #[command(flatten)]
        target: QueryTargetArgs,
    },

    /// Print every record of the first published snapshot
    Snapshot,

    /// Show resolved configuration
    Status,
}
