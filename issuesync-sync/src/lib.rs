//! # issuesync-sync
//!
//! Tracker client, per-file synchronization, run pipeline and outcome
//! reporting.
//!
//! Build a [`Synchronizer`] from a tracker, the repository, a
//! [`TemplateEngine`](issuesync_renderer::TemplateEngine) and a
//! [`RenderContext`](issuesync_renderer::RenderContext), then call
//! [`pipeline::run`] with a [`SyncScope`].

pub mod error;
pub mod github;
pub mod outcome;
pub mod pipeline;
pub mod synchronizer;
pub mod tracker;

pub use error::{ReportError, Stage, SyncError, TrackerError};
pub use github::GitHubClient;
pub use outcome::{ActionsReporter, IssueOutputs, Reporter};
pub use pipeline::{RunReport, SyncScope};
pub use synchronizer::{render_file, PreparedIssue, SyncOutcome, Synchronizer};
pub use tracker::{IssueTracker, IssueUpdate, NewIssue};
