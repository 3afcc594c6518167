//! Query command implementation

use clap::Args;

use suppressor::Result;

use crate::cli::{CommandContext, GlobalOptions};
use crate::output;

/// How the module key of a query is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTarget<'a> {
    /// Server module key, used as is
    ModuleKey(&'a str),
    /// Local project id, rendered with the configured format
    Project(&'a str),
}

/// Exactly one of `--module` or `--guid`
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct QueryTargetArgs {
    /// Server module key, used as is
    #[arg(long)]
    pub module: Option<String>,

    /// Local project id, rendered with the configured module key format
    #[arg(long)]
    pub guid: Option<String>,
}

impl QueryTargetArgs {
    pub fn target(&self) -> QueryTarget<'_> {
        match self.module.as_deref() {
            Some(module_key) => QueryTarget::ModuleKey(module_key),
            // The group guarantees --guid whenever --module is absent
            None => QueryTarget::Project(self.guid.as_deref().unwrap_or_default()),
        }
    }
}

/// Run one query against a freshly bound cache and print the matches
pub async fn run(opts: &GlobalOptions, file_path: &str, target: QueryTarget<'_>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let issues = match target {
        QueryTarget::ModuleKey(module_key) => ctx.cache.query(module_key, file_path).await,
        QueryTarget::Project(module) => ctx.cache.query_project(module, file_path).await,
    };
    log::debug!("{} suppressed issue(s) for {}", issues.len(), file_path);

    ctx.cache.close();
    output::print_issues(&issues, ctx.format)
}
