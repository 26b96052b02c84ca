//! agentdocs CLI - layered documentation migration for agent files.
//!
//! Rewrites the agent definition files in a directory so their
//! documentation-lookup instructions use the layered project-override /
//! plugin-default scheme.

mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::MigrateArgs;
use output::Output;

/// Migrate agent definition files to layered documentation lookup.
#[derive(Parser)]
#[command(name = "agentdocs", version, about)]
struct Cli {
    #[command(flatten)]
    args: MigrateArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = cli.args.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
