//! Working tree and index mutations
//!
//! The staging, committing, and dirty-tree recovery commands. All of these
//! stream their output to the terminal: they change the repository and the
//! operator should see git's own account of what happened.

use anyhow::Result;
use std::path::Path;

use super::runner::run_git_streamed_checked;

/// Stage the given paths for the next commit.
pub fn stage(paths: &[String], repo_root: &Path) -> Result<()> {
    let mut args: Vec<&str> = vec!["add", "--"];
    args.extend(paths.iter().map(String::as_str));
    run_git_streamed_checked(&args, repo_root)
}

/// Create a commit from the staged changes.
pub fn commit(message: &str, repo_root: &Path) -> Result<()> {
    run_git_streamed_checked(&["commit", "-m", message], repo_root)
}

/// Stash everything in the working tree under `label`.
///
/// Untracked files are included: whatever blocked a branch switch has to
/// end up in the stash, or the retry hits the same wall.
pub fn stash_push(label: &str, repo_root: &Path) -> Result<()> {
    run_git_streamed_checked(
        &["stash", "push", "--include-untracked", "-m", label],
        repo_root,
    )
}

/// Reset tracked files to HEAD, discarding local modifications.
pub fn reset_hard(repo_root: &Path) -> Result<()> {
    run_git_streamed_checked(&["reset", "--hard", "HEAD"], repo_root)
}

/// Remove untracked files and directories.
pub fn clean_untracked(repo_root: &Path) -> Result<()> {
    run_git_streamed_checked(&["clean", "-fd"], repo_root)
}
