//! `source-tasks` entry point.
//!
//! Loads one source (from the command line or an interactive prompt), prints its summary, then
//! runs tasks until `exit`/`quit` or end of input.

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?args, "starting");
    cli::run(args)
}
