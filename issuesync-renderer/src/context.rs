//! Render context: the variables every issue template sees.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use issuesync_core::{EventInfo, HostContext, RepoRef};

/// Environment variables never exposed to templates.
const HIDDEN_ENV: &[&str] = &["GITHUB_TOKEN", "INPUT_GITHUB_TOKEN", "ACTIONS_RUNTIME_TOKEN"];

/// Variables shared by every template in one run.
///
/// | Name                     | Value                                    |
/// |--------------------------|------------------------------------------|
/// | `repo.owner`, `repo.repo`| repository scope                         |
/// | `env.*`                  | process environment, tokens removed      |
/// | `date`                   | run start, ms since the Unix epoch       |
/// | `eventName`, `sha`, `ref`, `workflow`, `action`, `actor` | workflow metadata |
/// | `payload`                | webhook event payload                    |
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub repo: RepoRef,
    pub env: BTreeMap<String, String>,
    pub date: i64,
    #[serde(flatten)]
    pub event: EventInfo,
}

impl RenderContext {
    /// Build a context from explicit parts.
    pub fn new<I>(repo: RepoRef, event: EventInfo, env: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = env
            .into_iter()
            .filter(|(k, _)| !HIDDEN_ENV.contains(&k.as_str()))
            .collect();
        RenderContext {
            repo,
            env,
            date: now.timestamp_millis(),
            event,
        }
    }

    /// Build a context for `host` stamped with `now`.
    pub fn from_host<I>(host: &HostContext, env: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::new(host.repo.clone(), host.event.clone(), env, now)
    }
}
