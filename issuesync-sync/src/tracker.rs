//! Issue-tracker abstraction.
//!
//! The synchronizer talks to the tracker only through [`IssueTracker`], so
//! tests can swap in an in-memory fake for the GitHub client.

use serde::Serialize;

use issuesync_core::{RemoteIssue, RepoRef};

use crate::error::TrackerError;

/// Payload for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
}

/// Payload for updating an issue. Only the body changes; number and title
/// are left as they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueUpdate {
    pub body: String,
}

/// Capabilities the synchronizer needs from a remote issue tracker.
pub trait IssueTracker {
    /// Open issues in `repo` whose title contains `title`, in tracker order.
    fn search_open_issues(
        &self,
        repo: &RepoRef,
        title: &str,
    ) -> Result<Vec<RemoteIssue>, TrackerError>;

    /// Apply `update` to issue `number`.
    fn update_issue(
        &self,
        repo: &RepoRef,
        number: u64,
        update: &IssueUpdate,
    ) -> Result<RemoteIssue, TrackerError>;

    /// Open a new issue.
    fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> Result<RemoteIssue, TrackerError>;
}

/// Search-API query selecting open issues in `repo` with `title` in their title.
pub fn search_query(repo: &RepoRef, title: &str) -> String {
    format!("is:open is:issue repo:{repo} in:title {title}")
}

/// First candidate whose title equals `title` exactly.
pub fn find_exact<'a>(candidates: &'a [RemoteIssue], title: &str) -> Option<&'a RemoteIssue> {
    candidates.iter().find(|issue| issue.title == title)
}
