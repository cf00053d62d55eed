//! Outcome reporting to the CI host.
//!
//! [`ActionsReporter`] speaks the GitHub Actions workflow-command protocol:
//! step outputs go to the `GITHUB_OUTPUT` file (or `::set-output` when that
//! is unset) and failures print an `::error::` marker so the step is
//! recorded as failed.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use issuesync_core::RemoteIssue;

use crate::error::{ReportError, SyncError};
use crate::synchronizer::SyncOutcome;

/// Sink for per-file results.
pub trait Reporter {
    fn success(&mut self, outcome: &SyncOutcome) -> Result<(), ReportError>;
    fn failure(&mut self, error: &SyncError) -> Result<(), ReportError>;
}

/// Named outputs for downstream steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueOutputs {
    pub issue_number: u64,
    pub html_url: String,
}

impl IssueOutputs {
    /// `(output name, value)` pairs as the host expects them.
    pub fn pairs(&self) -> [(&'static str, String); 2] {
        [
            ("issue-number", self.issue_number.to_string()),
            ("html-url", self.html_url.clone()),
        ]
    }
}

impl From<&RemoteIssue> for IssueOutputs {
    fn from(issue: &RemoteIssue) -> Self {
        IssueOutputs {
            issue_number: issue.number,
            html_url: issue.html_url.clone(),
        }
    }
}

/// Escape a workflow-command message (`%`, CR, LF).
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

/// Escape a workflow-command property value.
fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

/// GitHub Actions reporter writing workflow commands to `out`.
pub struct ActionsReporter<W: Write> {
    out: W,
    output_file: Option<PathBuf>,
}

impl<W: Write> ActionsReporter<W> {
    /// `output_file` is the value of `GITHUB_OUTPUT`, if set.
    pub fn new(out: W, output_file: Option<PathBuf>) -> Self {
        ActionsReporter { out, output_file }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn set_outputs(&mut self, outputs: &IssueOutputs) -> Result<(), ReportError> {
        match &self.output_file {
            Some(path) => {
                let output_err = |source| ReportError::Output {
                    path: path.clone(),
                    source,
                };
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(output_err)?;
                for (name, value) in outputs.pairs() {
                    writeln!(file, "{name}={value}").map_err(output_err)?;
                }
            }
            None => {
                for (name, value) in outputs.pairs() {
                    writeln!(
                        self.out,
                        "::set-output name={}::{}",
                        escape_property(name),
                        escape_data(&value)
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> Reporter for ActionsReporter<W> {
    fn success(&mut self, outcome: &SyncOutcome) -> Result<(), ReportError> {
        match outcome {
            SyncOutcome::Created { issue, .. } => {
                self.set_outputs(&IssueOutputs::from(issue))?;
                tracing::info!("Created issue {}#{}: {}", issue.title, issue.number, issue.html_url);
            }
            SyncOutcome::Updated { issue, .. } => {
                self.set_outputs(&IssueOutputs::from(issue))?;
                tracing::info!("Updated issue {}#{}: {}", issue.title, issue.number, issue.html_url);
            }
            SyncOutcome::WouldCreate { path, issue } => {
                tracing::info!(
                    "[dry-run] would create issue \"{}\" from {}",
                    issue.title,
                    path.display()
                );
            }
            SyncOutcome::WouldUpdate { path, number, .. } => {
                tracing::info!("[dry-run] would update issue #{number} from {}", path.display());
            }
        }
        Ok(())
    }

    fn failure(&mut self, error: &SyncError) -> Result<(), ReportError> {
        let summary = error.summary();
        tracing::error!("{summary}");
        tracing::error!("{error}");
        for nested in error.nested_errors() {
            tracing::error!("{nested}");
        }
        writeln!(self.out, "::error::{}", escape_data(&format!("{summary}\n\n{error}")))?;
        Ok(())
    }
}
