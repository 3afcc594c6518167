//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.suppressor/config.yaml)
    pub config: Option<String>,

    /// Project key override
    pub project: Option<String>,

    /// Recorded issues file override
    pub issues: Option<String>,

    /// Treat the session as disconnected so no refresh runs
    pub offline: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            project: cli.project.clone(),
            issues: cli.issues.clone(),
            offline: cli.offline,
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn project_ref(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn issues_ref(&self) -> Option<&str> {
        self.issues.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::parse_from([
            "suppressor",
            "--format",
            "json",
            "--project",
            "proj1",
            "--issues",
            "issues.json",
            "--offline",
            "status",
        ]);

        let opts = GlobalOptions::from_cli(&cli);

        assert_eq!(opts.format, OutputFormat::Json);
        assert_eq!(opts.project_ref(), Some("proj1"));
        assert_eq!(opts.issues_ref(), Some("issues.json"));
        assert!(opts.offline);
    }

    #[test]
    fn test_none_accessors() {
        let opts = GlobalOptions {
            format: OutputFormat::Table,
            config: None,
            project: None,
            issues: None,
            offline: false,
        };

        assert_eq!(opts.config_ref(), None);
        assert_eq!(opts.project_ref(), None);
        assert_eq!(opts.issues_ref(), None);
    }
}
