//! GitHub REST implementation of [`IssueTracker`].
//!
//! | Operation  | Request                                   |
//! |------------|-------------------------------------------|
//! | search     | `GET /search/issues?q=…`                  |
//! | update     | `PATCH /repos/{owner}/{repo}/issues/{n}`  |
//! | create     | `POST /repos/{owner}/{repo}/issues`       |
//!
//! Requests are blocking; one agent is reused for the whole run.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use issuesync_core::{RemoteIssue, RepoRef};

use crate::error::TrackerError;
use crate::tracker::{search_query, IssueTracker, IssueUpdate, NewIssue};

const USER_AGENT: &str = concat!("issuesync/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";
const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<RemoteIssue>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// Blocking GitHub REST client.
pub struct GitHubClient {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// `base_url` is the API root, e.g. `https://api.github.com`. Without a
    /// token requests are anonymous (public data, low rate limit).
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        GitHubClient {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let req = self
            .agent
            .request(method, &format!("{}{}", self.base_url, path))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", API_VERSION);
        match &self.token {
            Some(token) => req.set("Authorization", &format!("Bearer {token}")),
            None => req,
        }
    }
}

fn issues_path(repo: &RepoRef) -> String {
    format!("/repos/{}/{}/issues", repo.owner, repo.repo)
}

fn decode<T: DeserializeOwned>(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<T, TrackerError> {
    match result {
        Ok(response) => response.into_json::<T>().map_err(TrackerError::Decode),
        Err(ureq::Error::Status(status, response)) => {
            let body: ApiErrorBody = response.into_json().unwrap_or_default();
            Err(TrackerError::Api {
                status,
                message: body.message.unwrap_or_else(|| format!("HTTP {status}")),
                errors: body.errors,
            })
        }
        Err(ureq::Error::Transport(transport)) => {
            Err(TrackerError::Transport(Box::new(transport)))
        }
    }
}

impl IssueTracker for GitHubClient {
    fn search_open_issues(
        &self,
        repo: &RepoRef,
        title: &str,
    ) -> Result<Vec<RemoteIssue>, TrackerError> {
        let q = search_query(repo, title);
        tracing::debug!(%q, "searching issues");
        let response: SearchResponse =
            decode(self.request("GET", "/search/issues").query("q", &q).call())?;
        Ok(response.items)
    }

    fn update_issue(
        &self,
        repo: &RepoRef,
        number: u64,
        update: &IssueUpdate,
    ) -> Result<RemoteIssue, TrackerError> {
        let path = format!("{}/{number}", issues_path(repo));
        decode(self.request("PATCH", &path).send_json(update))
    }

    fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> Result<RemoteIssue, TrackerError> {
        decode(self.request("POST", &issues_path(repo)).send_json(issue))
    }
}
