//! Command execution context
//!
//! Loads configuration, applies overrides and binds a suppressed-issue cache
//! to the configured project and recorded issues file.

use std::sync::Arc;

use suppressor::client::RecordedIssueSource;
use suppressor::config::Config;
use suppressor::error::{ConfigError, Error};
use suppressor::{Result, Session, SuppressedIssueCache};

use crate::cli::{GlobalOptions, OutputFormat};

/// Context for command execution containing the cache and runtime options.
pub struct CommandContext {
    /// Cache bound to the configured project
    pub cache: SuppressedIssueCache,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is tolerated when `--project` is given, so the
    /// binary can run from flags alone.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded or is incomplete.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = load_config(opts)?;
        config.validate()?;

        let project_key = config.require_project_key()?.to_string();
        let source = RecordedIssueSource::new(config.require_issues_file()?);
        let session = Session::new(!opts.offline);
        if opts.offline {
            log::debug!("Offline: refreshes will be skipped");
        }

        let cache = SuppressedIssueCache::new(
            project_key,
            Arc::new(source),
            Arc::new(session),
            config.cache_options(),
        );

        Ok(Self {
            cache,
            format: opts.format,
        })
    }
}

/// Load the config file and merge the command-line overrides into it.
pub fn load_config(opts: &GlobalOptions) -> Result<Config> {
    let config = match Config::load_at(opts.config_ref()) {
        Ok(config) => config,
        Err(Error::Config(ConfigError::NotFound)) if opts.project.is_some() => Config::default(),
        Err(err) => return Err(err),
    };
    Ok(config.with_overrides(opts.project_ref(), opts.issues_ref()))
}
