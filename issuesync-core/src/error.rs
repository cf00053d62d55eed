//! Error types for issuesync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from walking the repository tree.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A directory could not be read (missing root, permission denied, etc.).
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from splitting and parsing a front-matter block.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    /// The opening `---` has no matching closing line.
    #[error("front matter opened on line 1 is never closed with '---'")]
    Unterminated,

    /// The block is not valid YAML, or not a mapping of known attribute types.
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors from reading the host environment.
#[derive(Debug, Error)]
pub enum HostError {
    /// A required environment variable is unset or empty.
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    /// `GITHUB_REPOSITORY` is not of the form `owner/name`.
    #[error("GITHUB_REPOSITORY must look like 'owner/name', got '{0}'")]
    InvalidRepository(String),

    /// The event payload named by `GITHUB_EVENT_PATH` could not be read.
    #[error("cannot read event payload at {path}: {source}")]
    EventPayloadIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The event payload is not valid JSON.
    #[error("event payload at {path} is not valid JSON: {source}")]
    EventPayloadJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DiscoveryError {
    DiscoveryError::Io {
        path: path.into(),
        source,
    }
}
