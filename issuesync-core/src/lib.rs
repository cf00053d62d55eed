//! issuesync core library: domain types, issue-file discovery, front
//! matter, host configuration.
//!
//! - [`types`]: repository scope, front matter, rendered and remote issues
//! - [`discovery`]: recursive `*.issue.md` walk
//! - [`frontmatter`]: attribute block / body split
//! - [`host`]: [`HostContext`] from the CI environment
//! - [`error`]: per-concern error enums

pub mod discovery;
pub mod error;
pub mod frontmatter;
pub mod host;
pub mod types;

pub use error::{DiscoveryError, FrontMatterError, HostError};
pub use host::{EventInfo, HostContext};
pub use types::{
    FrontMatter, IssueFile, Milestone, RemoteIssue, RenderedIssue, RepoRef, StringList,
};
