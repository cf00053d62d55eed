//! Run pipeline shared by both entry points.

use std::path::PathBuf;

use issuesync_core::discovery;

use crate::error::SyncError;
use crate::outcome::Reporter;
use crate::synchronizer::{SyncOutcome, Synchronizer};

/// Scope for a sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// Sync one file; the file is the run.
    File(PathBuf),
    /// Sync every `*.issue.md` file under `root`.
    All { root: PathBuf },
}

/// Per-file results of a run, in processing order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub results: Vec<Result<SyncOutcome, SyncError>>,
}

impl RunReport {
    pub fn outcomes(&self) -> impl Iterator<Item = &SyncOutcome> {
        self.results.iter().filter_map(|r| r.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SyncError> {
        self.results.iter().filter_map(|r| r.as_ref().err())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// True when no file failed.
    pub fn succeeded(&self) -> bool {
        self.results.iter().all(Result::is_ok)
    }

    pub fn processed(&self) -> usize {
        self.results.len()
    }
}

/// Run the sync pipeline for a scope.
///
/// Files are processed strictly one after another. Every outcome and every
/// failure goes to `reporter` as it happens. File-level failures are
/// collected in the report and the run moves on; run-fatal failures are
/// reported and then returned as `Err`.
pub fn run(
    sync: &Synchronizer<'_>,
    scope: SyncScope,
    reporter: &mut dyn Reporter,
) -> Result<RunReport, SyncError> {
    let paths = match scope {
        SyncScope::File(path) => vec![path],
        SyncScope::All { root } => match discovery::list_issue_files(&root) {
            Ok(paths) => {
                tracing::info!("found {} issue file(s) under {}", paths.len(), root.display());
                paths
            }
            Err(e) => {
                let err = SyncError::from(e);
                report_failure(reporter, &err)?;
                return Err(err);
            }
        },
    };

    let mut report = RunReport::default();
    for path in paths {
        match sync.sync_file(&path) {
            Ok(outcome) => {
                reporter.success(&outcome)?;
                report.results.push(Ok(outcome));
            }
            Err(err) => {
                report_failure(reporter, &err)?;
                if err.is_run_fatal() {
                    return Err(err);
                }
                report.results.push(Err(err));
            }
        }
    }
    Ok(report)
}

/// Hand `err` to the reporter. If that fails, `err` is logged before the
/// reporting error is returned.
fn report_failure(reporter: &mut dyn Reporter, err: &SyncError) -> Result<(), SyncError> {
    reporter.failure(err).map_err(|report_err| {
        tracing::error!(error = %err, "could not report failure: {report_err}");
        SyncError::from(report_err)
    })
}
