//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per issue
    #[default]
    Table,
    /// JSON format - structured for scripts, replayable as an issues file
    Json,
}
