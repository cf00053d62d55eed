//! Per-file sync: read → parse → render → search → update or create.
//!
//! State per file:
//!
//! ```text
//! Unprocessed → Rendered → Matched   → Updated | Failed
//!                        → Unmatched → Created | Failed
//! ```
//!
//! At most one remote issue is touched per file. Exact title equality is the
//! only correlation between a file and an existing issue.

use std::path::{Path, PathBuf};

use issuesync_core::{frontmatter, FrontMatter, RemoteIssue, RenderedIssue, RepoRef};
use issuesync_renderer::{RenderContext, TemplateEngine};

use crate::error::SyncError;
use crate::tracker::{find_exact, IssueTracker, IssueUpdate, NewIssue};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Successful result of syncing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No open issue had the title; a new one was opened.
    Created { path: PathBuf, issue: RemoteIssue },
    /// An open issue had the title; its body was replaced.
    Updated { path: PathBuf, issue: RemoteIssue },
    /// Dry run: an issue *would* have been created.
    WouldCreate { path: PathBuf, issue: NewIssue },
    /// Dry run: issue `number` *would* have been updated.
    WouldUpdate {
        path: PathBuf,
        number: u64,
        update: IssueUpdate,
    },
}

impl SyncOutcome {
    pub fn path(&self) -> &Path {
        match self {
            SyncOutcome::Created { path, .. }
            | SyncOutcome::Updated { path, .. }
            | SyncOutcome::WouldCreate { path, .. }
            | SyncOutcome::WouldUpdate { path, .. } => path,
        }
    }

    /// The remote issue written to, for non-dry-run outcomes.
    pub fn remote(&self) -> Option<&RemoteIssue> {
        match self {
            SyncOutcome::Created { issue, .. } | SyncOutcome::Updated { issue, .. } => Some(issue),
            _ => None,
        }
    }
}

/// A file after parsing and rendering, before any tracker call.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedIssue {
    pub path: PathBuf,
    pub attributes: FrontMatter,
    pub rendered: RenderedIssue,
}

impl PreparedIssue {
    /// Create payload: rendered title/body plus front-matter assignees,
    /// labels and milestone.
    pub fn new_issue(&self) -> NewIssue {
        NewIssue {
            title: self.rendered.title.clone(),
            body: self.rendered.body.clone(),
            assignees: self.attributes.assignees.as_slice().to_vec(),
            labels: self.attributes.labels.as_slice().to_vec(),
            milestone: self.attributes.milestone.map(|m| m.0),
        }
    }
}

// ---------------------------------------------------------------------------
// render_file
// ---------------------------------------------------------------------------

/// Read, parse and render the issue file at `path`.
///
/// The rendered title is trimmed; a missing or blank title is an error.
pub fn render_file(
    path: &Path,
    engine: &TemplateEngine,
    ctx: &RenderContext,
) -> Result<PreparedIssue, SyncError> {
    tracing::debug!("reading from file {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| SyncError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file = frontmatter::parse(&content).map_err(|source| SyncError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("front matter for {} is {:?}", path.display(), file.attributes);

    let missing_title = || SyncError::MissingTitle {
        path: path.to_path_buf(),
    };
    let title_template = file.attributes.title.as_deref().ok_or_else(missing_title)?;

    let mut rendered = engine
        .render_issue(title_template, &file.body, ctx)
        .map_err(|source| SyncError::Render {
            path: path.to_path_buf(),
            source,
        })?;
    rendered.title = rendered.title.trim().to_string();
    if rendered.title.is_empty() {
        return Err(missing_title());
    }
    tracing::debug!(title = %rendered.title, body_len = rendered.body.len(), "templates compiled");

    Ok(PreparedIssue {
        path: path.to_path_buf(),
        attributes: file.attributes,
        rendered,
    })
}

// ---------------------------------------------------------------------------
// Synchronizer
// ---------------------------------------------------------------------------

/// Everything one run needs to sync files, passed in explicitly.
///
/// The render context is built once by the caller and shared read-only by
/// every file in the run.
pub struct Synchronizer<'a> {
    tracker: &'a dyn IssueTracker,
    repo: &'a RepoRef,
    engine: &'a TemplateEngine,
    context: &'a RenderContext,
    dry_run: bool,
}

impl<'a> Synchronizer<'a> {
    pub fn new(
        tracker: &'a dyn IssueTracker,
        repo: &'a RepoRef,
        engine: &'a TemplateEngine,
        context: &'a RenderContext,
    ) -> Self {
        Synchronizer {
            tracker,
            repo,
            engine,
            context,
            dry_run: false,
        }
    }

    /// Search but never create or update.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Sync a single issue file.
    pub fn sync_file(&self, path: &Path) -> Result<SyncOutcome, SyncError> {
        let prepared = render_file(path, self.engine, self.context)?;
        let title = prepared.rendered.title.as_str();

        tracing::info!("Fetching issues with title \"{title}\"");
        let candidates = self
            .tracker
            .search_open_issues(self.repo, title)
            .map_err(|source| SyncError::Search {
                path: path.to_path_buf(),
                source,
            })?;

        match find_exact(&candidates, title) {
            Some(existing) => self.update(&prepared, existing),
            None => {
                tracing::info!("No existing issue found to update");
                self.create(&prepared)
            }
        }
    }

    fn update(
        &self,
        prepared: &PreparedIssue,
        existing: &RemoteIssue,
    ) -> Result<SyncOutcome, SyncError> {
        let update = IssueUpdate {
            body: prepared.rendered.body.clone(),
        };
        if self.dry_run {
            return Ok(SyncOutcome::WouldUpdate {
                path: prepared.path.clone(),
                number: existing.number,
                update,
            });
        }

        tracing::info!(
            "Updating existing issue {}#{}: {}",
            existing.title,
            existing.number,
            existing.html_url
        );
        let issue = self
            .tracker
            .update_issue(self.repo, existing.number, &update)
            .map_err(|source| SyncError::Update {
                path: prepared.path.clone(),
                number: existing.number,
                source,
            })?;
        Ok(SyncOutcome::Updated {
            path: prepared.path.clone(),
            issue,
        })
    }

    fn create(&self, prepared: &PreparedIssue) -> Result<SyncOutcome, SyncError> {
        let new_issue = prepared.new_issue();
        if self.dry_run {
            return Ok(SyncOutcome::WouldCreate {
                path: prepared.path.clone(),
                issue: new_issue,
            });
        }

        tracing::info!("Creating new issue {}", new_issue.title);
        let issue = self
            .tracker
            .create_issue(self.repo, &new_issue)
            .map_err(|source| SyncError::Create {
                path: prepared.path.clone(),
                source,
            })?;
        Ok(SyncOutcome::Created {
            path: prepared.path.clone(),
            issue,
        })
    }
}
