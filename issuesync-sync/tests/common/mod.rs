#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use issuesync_core::{EventInfo, RemoteIssue, RepoRef};
use issuesync_renderer::RenderContext;
use issuesync_sync::{
    IssueTracker, IssueUpdate, NewIssue, ReportError, Reporter, SyncError, SyncOutcome,
    TrackerError,
};

// ---------------------------------------------------------------------------
// In-memory tracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search(String),
    Update(u64, IssueUpdate),
    Create(NewIssue),
}

/// Tracker double: search matches by substring, numbers are sequential.
#[derive(Default)]
pub struct FakeTracker {
    pub issues: RefCell<Vec<RemoteIssue>>,
    calls: RefCell<Vec<Call>>,
    reject_create: Option<u16>,
    reject_update: Option<u16>,
    reject_search: Option<u16>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issues(existing: &[(u64, &str)]) -> Self {
        let tracker = Self::new();
        tracker
            .issues
            .borrow_mut()
            .extend(existing.iter().map(|(n, t)| issue(*n, t)));
        tracker
    }

    pub fn rejecting_create(mut self, status: u16) -> Self {
        self.reject_create = Some(status);
        self
    }

    pub fn rejecting_update(mut self, status: u16) -> Self {
        self.reject_update = Some(status);
        self
    }

    pub fn rejecting_search(mut self, status: u16) -> Self {
        self.reject_search = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Create/update calls only.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Search(_)))
            .collect()
    }

    pub fn titles(&self) -> Vec<String> {
        self.issues.borrow().iter().map(|i| i.title.clone()).collect()
    }
}

fn rejection(status: u16) -> TrackerError {
    TrackerError::Api {
        status,
        message: "Validation Failed".to_string(),
        errors: vec![serde_json::json!({ "resource": "Issue", "code": "invalid" })],
    }
}

pub fn issue(number: u64, title: &str) -> RemoteIssue {
    RemoteIssue {
        number,
        title: title.to_string(),
        html_url: format!("https://github.com/octo/demo/issues/{number}"),
    }
}

impl IssueTracker for FakeTracker {
    fn search_open_issues(
        &self,
        _repo: &RepoRef,
        title: &str,
    ) -> Result<Vec<RemoteIssue>, TrackerError> {
        self.calls.borrow_mut().push(Call::Search(title.to_string()));
        if let Some(status) = self.reject_search {
            return Err(rejection(status));
        }
        Ok(self
            .issues
            .borrow()
            .iter()
            .filter(|i| i.title.contains(title))
            .cloned()
            .collect())
    }

    fn update_issue(
        &self,
        _repo: &RepoRef,
        number: u64,
        update: &IssueUpdate,
    ) -> Result<RemoteIssue, TrackerError> {
        self.calls
            .borrow_mut()
            .push(Call::Update(number, update.clone()));
        if let Some(status) = self.reject_update {
            return Err(rejection(status));
        }
        self.issues
            .borrow()
            .iter()
            .find(|i| i.number == number)
            .cloned()
            .ok_or_else(|| rejection(404))
    }

    fn create_issue(&self, _repo: &RepoRef, new: &NewIssue) -> Result<RemoteIssue, TrackerError> {
        self.calls.borrow_mut().push(Call::Create(new.clone()));
        if let Some(status) = self.reject_create {
            return Err(rejection(status));
        }
        let mut issues = self.issues.borrow_mut();
        let number = issues.iter().map(|i| i.number).max().unwrap_or(0) + 1;
        let created = issue(number, &new.title);
        issues.push(created.clone());
        Ok(created)
    }
}

// ---------------------------------------------------------------------------
// Recording reporter
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingReporter {
    pub successes: Vec<SyncOutcome>,
    pub failures: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn success(&mut self, outcome: &SyncOutcome) -> Result<(), ReportError> {
        self.successes.push(outcome.clone());
        Ok(())
    }

    fn failure(&mut self, error: &SyncError) -> Result<(), ReportError> {
        self.failures.push(error.summary());
        Ok(())
    }
}

/// Accepts successes, fails every failure report.
pub struct BrokenReporter;

impl Reporter for BrokenReporter {
    fn success(&mut self, _outcome: &SyncOutcome) -> Result<(), ReportError> {
        Ok(())
    }

    fn failure(&mut self, _error: &SyncError) -> Result<(), ReportError> {
        Err(ReportError::Stream(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "stdout closed",
        )))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn repo() -> RepoRef {
    RepoRef::new("octo", "demo")
}

/// Context stamped 2024-06-15T10:00:00Z.
pub fn context() -> RenderContext {
    RenderContext::new(
        repo(),
        EventInfo::default(),
        vec![("TEAM".to_string(), "platform".to_string())],
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap(),
    )
}

pub fn write_issue(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(&path, content).expect("write issue file");
    path
}
