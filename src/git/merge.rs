//! Merging the integration branch into a feature branch

use anyhow::Result;
use std::path::Path;
use std::process::ExitStatus;

use super::runner::run_git_streamed;

/// Run `git merge <branch>`, streaming git's own narration.
///
/// The exit status is returned, not judged: "Already up to date" and a
/// conflicted stop both leave the decision to the caller, which inspects
/// the working tree afterwards.
pub fn merge(branch: &str, repo_root: &Path) -> Result<ExitStatus> {
    run_git_streamed(&["merge", branch], repo_root)
}
