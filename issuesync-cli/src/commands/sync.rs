//! `issuesync sync`: create or update issues from issue files.

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use issuesync_renderer::TemplateEngine;
use issuesync_sync::{
    pipeline::{self, RunReport, SyncScope},
    ActionsReporter, GitHubClient, SyncError, SyncOutcome, Synchronizer,
};
use tabled::{settings::Style, Table, Tabled};

/// Arguments for `issuesync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Issue file to sync. Without one, every issue file in the workspace
    /// is synced.
    #[arg(env = "ISSUESYNC_FILE")]
    pub file: Option<PathBuf>,

    /// Sync every `*.issue.md` file under the workspace even when FILE or
    /// `ISSUESYNC_FILE` is set.
    #[arg(long)]
    pub all: bool,

    /// Discovery root when syncing all files (defaults to `GITHUB_WORKSPACE`).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Search for matching issues but create or update nothing.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let (host, context) = super::load_host()?;

        let token = match host.token.clone() {
            Some(token) => Some(token),
            None if self.dry_run => {
                tracing::warn!("GITHUB_TOKEN is not set; searching anonymously");
                None
            }
            None => bail!("GITHUB_TOKEN is required (use --dry-run to preview without it)"),
        };

        let scope = match self.file {
            Some(file) if !self.all => SyncScope::File(file),
            _ => SyncScope::All {
                root: self.root.unwrap_or_else(|| host.workspace.clone()),
            },
        };

        let engine = TemplateEngine::new();
        let client = GitHubClient::new(host.api_url.clone(), token);
        let sync = Synchronizer::new(&client, &host.repo, &engine, &context)
            .with_dry_run(self.dry_run);

        let report = {
            let mut reporter = ActionsReporter::new(io::stdout().lock(), host.output_path.clone());
            pipeline::run(&sync, scope, &mut reporter).context("sync aborted")?
        };

        print_results(&report, self.dry_run);
        if !report.succeeded() {
            bail!(
                "{} of {} issue file(s) failed",
                report.failure_count(),
                report.processed()
            );
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "file")]
    file: String,
    #[tabled(rename = "result")]
    result: String,
    #[tabled(rename = "issue")]
    issue: String,
}

impl From<&Result<SyncOutcome, SyncError>> for ResultRow {
    fn from(result: &Result<SyncOutcome, SyncError>) -> Self {
        match result {
            Ok(outcome) => ResultRow::from(outcome),
            Err(err) => ResultRow::from(err),
        }
    }
}

impl From<&SyncOutcome> for ResultRow {
    fn from(outcome: &SyncOutcome) -> Self {
        let (result, issue) = match outcome {
            SyncOutcome::Created { issue, .. } => ("created", format!("#{}", issue.number)),
            SyncOutcome::Updated { issue, .. } => ("updated", format!("#{}", issue.number)),
            SyncOutcome::WouldCreate { .. } => ("would create", "-".to_string()),
            SyncOutcome::WouldUpdate { number, .. } => ("would update", format!("#{number}")),
        };
        ResultRow {
            file: outcome.path().display().to_string(),
            result: result.to_string(),
            issue,
        }
    }
}

impl From<&SyncError> for ResultRow {
    fn from(err: &SyncError) -> Self {
        let result = match err.stage() {
            Some(stage) => format!("failed while {}", stage.verb()),
            None => "failed".to_string(),
        };
        ResultRow {
            file: err
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            result,
            issue: "-".to_string(),
        }
    }
}

fn print_results(report: &RunReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    if report.processed() == 0 {
        println!("{prefix}No issue files found.");
        return;
    }

    let rows: Vec<ResultRow> = report.results.iter().map(ResultRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    let mark = if report.succeeded() {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!(
        "{prefix}{mark} {} synced, {} failed",
        report.processed() - report.failure_count(),
        report.failure_count()
    );
}
