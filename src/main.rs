//! Suppressor CLI - inspect the suppressed issues cached for a project

use clap::Parser;

mod cli;
mod output;

use cli::{Cli, Commands, GlobalOptions};
use suppressor::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` lowers the default filter; RUST_LOG still wins when set.
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Query { file_path, target } => {
            cli::query::run(&opts, &file_path, target.target()).await
        }
        Commands::Snapshot => cli::snapshot::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
    }
}
