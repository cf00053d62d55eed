//! Recursive discovery of `*.issue.md` files.
//!
//! The walk is eager and follows no symlinks: a symlinked directory is
//! reported as a plain entry, so link cycles cannot recurse forever.
//! Results come back in filesystem enumeration order.

use std::path::{Path, PathBuf};

use crate::error::{io_err, DiscoveryError};

/// File-name suffix that marks an issue template.
pub const ISSUE_FILE_SUFFIX: &str = ".issue.md";

/// Every non-directory entry under `root`, recursively.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut out = Vec::new();
    collect_files(root, &mut out)?;
    Ok(out)
}

/// Every file under `root` whose name ends in [`ISSUE_FILE_SUFFIX`].
pub fn list_issue_files(root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    Ok(list_files(root)?
        .into_iter()
        .filter(|p| is_issue_file(p))
        .collect())
}

/// Whether the final path segment ends in [`ISSUE_FILE_SUFFIX`].
pub fn is_issue_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(ISSUE_FILE_SUFFIX))
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), DiscoveryError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}
