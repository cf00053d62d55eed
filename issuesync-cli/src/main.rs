//! issuesync: keep GitHub issues in sync with `*.issue.md` files.
//!
//! # Usage
//!
//! ```text
//! issuesync sync [FILE] [--dry-run]
//! issuesync sync [--all] [--root DIR] [--dry-run]
//! issuesync render FILE [--json]
//! ```
//!
//! Host configuration comes from the GitHub Actions environment
//! (`GITHUB_REPOSITORY`, `GITHUB_TOKEN`, `GITHUB_OUTPUT`, ...). Logs go to
//! stderr; stdout carries workflow commands and the summary.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{render::RenderArgs, sync::SyncArgs};

#[derive(Parser, Debug)]
#[command(
    name = "issuesync",
    version,
    about = "Create or update GitHub issues from templated markdown files",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render issue files and create or update the matching issues.
    Sync(SyncArgs),

    /// Print the rendered title and body of one issue file.
    Render(RenderArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Render(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
