//! Host (CI runner) configuration read from the environment.
//!
//! # API pattern
//!
//! - `HostContext::from_lookup(f)`: explicit lookup; used in tests
//! - `HostContext::from_env()`: reads the process environment, delegates
//!
//! Tests must never call `from_env`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::HostError;
use crate::types::RepoRef;

/// REST endpoint used when `GITHUB_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Workflow event metadata exposed to templates.
///
/// Field names serialize in camelCase (`eventName`, `ref`, …).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    pub event_name: Option<String>,
    pub sha: Option<String>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub workflow: Option<String>,
    pub action: Option<String>,
    pub actor: Option<String>,
    /// Parsed `GITHUB_EVENT_PATH` document; `null` when absent.
    pub payload: serde_json::Value,
}

/// Everything the tool needs from the host environment.
#[derive(Debug, Clone, PartialEq)]
pub struct HostContext {
    pub repo: RepoRef,
    pub token: Option<String>,
    pub api_url: String,
    /// Default discovery root.
    pub workspace: PathBuf,
    /// File that receives named step outputs.
    pub output_path: Option<PathBuf>,
    pub event: EventInfo,
}

impl HostContext {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HostError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let repository =
            var("GITHUB_REPOSITORY").ok_or(HostError::MissingVar("GITHUB_REPOSITORY"))?;
        let repo = RepoRef::parse(&repository)
            .ok_or_else(|| HostError::InvalidRepository(repository.clone()))?;

        let payload = match var("GITHUB_EVENT_PATH") {
            Some(path) => load_payload(Path::new(&path))?,
            None => serde_json::Value::Null,
        };

        Ok(HostContext {
            repo,
            token: var("GITHUB_TOKEN"),
            api_url: var("GITHUB_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            workspace: var("GITHUB_WORKSPACE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            output_path: var("GITHUB_OUTPUT").map(PathBuf::from),
            event: EventInfo {
                event_name: var("GITHUB_EVENT_NAME"),
                sha: var("GITHUB_SHA"),
                git_ref: var("GITHUB_REF"),
                workflow: var("GITHUB_WORKFLOW"),
                action: var("GITHUB_ACTION"),
                actor: var("GITHUB_ACTOR"),
                payload,
            },
        })
    }
}

fn load_payload(path: &Path) -> Result<serde_json::Value, HostError> {
    let contents = std::fs::read_to_string(path).map_err(|source| HostError::EventPayloadIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| HostError::EventPayloadJson {
        path: path.to_path_buf(),
        source,
    })
}
