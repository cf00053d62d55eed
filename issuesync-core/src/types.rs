//! Domain types for issue files and the remote tracker.
//!
//! Front-matter types deserialize via serde + serde_yaml. Remote types
//! deserialize from the tracker's JSON and ignore fields they do not name.

use std::collections::BTreeMap;
use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Repository scope
// ---------------------------------------------------------------------------

/// `owner/name` scope of a repository on the issue tracker.
///
/// Serializes as `{ owner, repo }` so templates can use `{{ repo.owner }}`
/// and `{{ repo.repo }}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse the `owner/name` form used by `GITHUB_REPOSITORY`.
    ///
    /// Returns `None` unless there are exactly two non-empty segments.
    pub fn parse(s: &str) -> Option<Self> {
        let (owner, repo) = s.trim().split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some(Self::new(owner, repo))
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

// ---------------------------------------------------------------------------
// Front-matter attribute values
// ---------------------------------------------------------------------------

/// A list attribute written either as a YAML sequence or as a
/// comma-separated string (`labels: bug, chore`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl StringList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for StringList {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

impl<'de> Deserialize<'de> for StringList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Joined(String),
            Items(Vec<String>),
        }

        let items: Vec<String> = match Option::<Raw>::deserialize(deserializer)? {
            None => Vec::new(),
            Some(Raw::Joined(s)) => s.split(',').map(str::to_owned).collect(),
            Some(Raw::Items(v)) => v,
        };
        Ok(Self(
            items
                .into_iter()
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect(),
        ))
    }
}

/// Milestone number; accepts `milestone: 3` and `milestone: "3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Milestone(pub u64);

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for Milestone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s.trim().parse().map(Self).map_err(|_| {
                de::Error::custom(format!("milestone must be a number, got '{s}'"))
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Issue files
// ---------------------------------------------------------------------------

/// Attribute block of an `*.issue.md` file.
///
/// `title` is the only attribute the sync requires. Unrecognized keys are
/// kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "StringList::is_empty")]
    pub assignees: StringList,
    #[serde(default, skip_serializing_if = "StringList::is_empty")]
    pub labels: StringList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A parsed issue file: attributes plus the body with the block stripped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueFile {
    pub attributes: FrontMatter,
    pub body: String,
}

/// Title and body after template rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedIssue {
    pub title: String,
    pub body: String,
}

/// An issue as returned by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIssue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
