//! Error types for issuesync-sync.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use issuesync_core::{DiscoveryError, FrontMatterError};
use issuesync_renderer::RenderError;

/// Errors returned by an [`IssueTracker`](crate::tracker::IssueTracker).
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Api {
        status: u16,
        message: String,
        /// Structured validation errors, when the API sent any.
        errors: Vec<serde_json::Value>,
    },

    /// The request never got a response (DNS, TLS, connection reset, …).
    #[error("request failed: {0}")]
    Transport(#[source] Box<ureq::Transport>),

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[source] std::io::Error),
}

impl TrackerError {
    /// Nested validation errors carried by an API rejection.
    pub fn nested_errors(&self) -> &[serde_json::Value] {
        match self {
            TrackerError::Api { errors, .. } => errors,
            _ => &[],
        }
    }
}

/// Errors from emitting outcomes to the host.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The step-output file could not be appended to.
    #[error("cannot write step outputs to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a workflow command to the output stream failed.
    #[error("cannot write workflow command: {0}")]
    Stream(#[from] std::io::Error),
}

/// Pipeline stage a file-level error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reading,
    Parsing,
    Rendering,
    Searching,
    Updating,
    Creating,
}

impl Stage {
    /// Verb phrase used in "An error occurred while … the issue."
    pub fn verb(&self) -> &'static str {
        match self {
            Stage::Reading => "reading",
            Stage::Parsing => "parsing",
            Stage::Rendering => "rendering",
            Stage::Searching => "searching for",
            Stage::Updating => "updating",
            Stage::Creating => "creating",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The discovery root could not be walked.
    #[error("cannot discover issue files: {0}")]
    Discovery(#[from] DiscoveryError),

    /// An issue file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The front-matter block is unterminated or not valid YAML.
    #[error("malformed front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    /// No `title` attribute, or one that renders to blank.
    #[error("{path} has no title; set `title:` in its front matter")]
    MissingTitle { path: PathBuf },

    /// Title or body template failed to render.
    #[error("cannot render {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    /// Looking up existing issues failed.
    #[error("searching for existing issues failed: {source}")]
    Search {
        path: PathBuf,
        #[source]
        source: TrackerError,
    },

    /// The tracker rejected the new issue.
    #[error("creating the issue failed: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: TrackerError,
    },

    /// The tracker rejected the body update.
    #[error("updating issue #{number} failed: {source}")]
    Update {
        path: PathBuf,
        number: u64,
        #[source]
        source: TrackerError,
    },

    /// Outputs or the failure marker could not be written.
    #[error("reporting failed: {0}")]
    Report(#[from] ReportError),
}

impl SyncError {
    /// Issue file the error belongs to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            SyncError::Io { path, .. }
            | SyncError::FrontMatter { path, .. }
            | SyncError::MissingTitle { path }
            | SyncError::Render { path, .. }
            | SyncError::Search { path, .. }
            | SyncError::Create { path, .. }
            | SyncError::Update { path, .. } => Some(path),
            SyncError::Discovery(_) | SyncError::Report(_) => None,
        }
    }

    /// Stage of a file-level error.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SyncError::Io { .. } => Some(Stage::Reading),
            SyncError::FrontMatter { .. } => Some(Stage::Parsing),
            SyncError::MissingTitle { .. } | SyncError::Render { .. } => Some(Stage::Rendering),
            SyncError::Search { .. } => Some(Stage::Searching),
            SyncError::Update { .. } => Some(Stage::Updating),
            SyncError::Create { .. } => Some(Stage::Creating),
            SyncError::Discovery(_) | SyncError::Report(_) => None,
        }
    }

    /// Whether the error ends the whole run rather than just its file.
    ///
    /// I/O failures (missing root, unreadable file) and reporting failures
    /// are run-fatal; everything else only fails the file.
    pub fn is_run_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::Discovery(_) | SyncError::Io { .. } | SyncError::Report(_)
        )
    }

    /// The tracker error behind a search/create/update failure.
    pub fn tracker_error(&self) -> Option<&TrackerError> {
        match self {
            SyncError::Search { source, .. }
            | SyncError::Create { source, .. }
            | SyncError::Update { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Nested API validation errors, if any.
    pub fn nested_errors(&self) -> &[serde_json::Value] {
        self.tracker_error()
            .map(TrackerError::nested_errors)
            .unwrap_or(&[])
    }

    /// One-line, user-facing description naming the stage and the file.
    pub fn summary(&self) -> String {
        match (self.stage(), self.path()) {
            (Some(stage), Some(path)) => format!(
                "An error occurred while {} the issue. Check {}.",
                stage.verb(),
                path.display()
            ),
            _ => match self {
                SyncError::Discovery(_) => {
                    "An error occurred while discovering issue files.".to_string()
                }
                _ => "An error occurred while reporting the outcome.".to_string(),
            },
        }
    }
}
