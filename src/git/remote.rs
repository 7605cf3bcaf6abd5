//! Remote operations: fetch, pull, push
//!
//! All of these stream, since they can take a while and may prompt for
//! credentials. Failures carry git's exit code up to the top level.

use anyhow::Result;
use std::path::Path;

use super::runner::{run_git, run_git_streamed_checked};

/// Fetch one branch from the remote.
pub fn fetch(remote: &str, branch: &str, repo_root: &Path) -> Result<()> {
    run_git_streamed_checked(&["fetch", remote, branch], repo_root)
}

/// Pull one branch from the remote into the current branch.
pub fn pull(remote: &str, branch: &str, repo_root: &Path) -> Result<()> {
    run_git_streamed_checked(&["pull", remote, branch], repo_root)
}

/// Push a ref (branch or tag) to the remote.
pub fn push(remote: &str, refname: &str, repo_root: &Path) -> Result<()> {
    run_git_streamed_checked(&["push", remote, refname], repo_root)
}

/// Remove a tag on the remote, best effort. The force-replace path calls
/// this whether or not the remote ever had the tag.
pub fn delete_remote_tag(remote: &str, tag: &str, repo_root: &Path) {
    let refspec = format!(":refs/tags/{tag}");
    let _ = run_git(&["push", remote, &refspec], repo_root);
}
