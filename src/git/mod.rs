//! Git operations for the check-in and release workflows
//!
//! Everything here shells out to the `git` binary; nothing links a git
//! library. The module provides:
//! - Branch and repository queries
//! - Working tree status parsing
//! - Staging, committing, and dirty-tree recovery mutations
//! - Remote fetch/pull/push and tag management

use anyhow::{bail, Result};
use std::path::Path;

pub mod branch;
pub mod merge;
pub mod remote;
pub mod runner;
pub mod status;
pub mod tag;
pub mod worktree;

// Re-export commonly used types and functions
pub use branch::{
    branch_exists, current_branch, is_ancestor_of, is_inside_work_tree, repo_root,
    unique_branch_name,
};
pub use merge::merge;
pub use remote::{delete_remote_tag, fetch, pull, push};
pub use runner::{
    run_git, run_git_bool, run_git_checked, run_git_checked_raw, run_git_streamed,
    run_git_streamed_checked, GitFailure,
};
pub use status::{working_tree_status, StatusEntry, WorkingTreeStatus};
pub use tag::{create_annotated_tag, delete_tag, tag_exists};
pub use worktree::{clean_untracked, commit, reset_hard, stage, stash_push};

/// Check that the git binary is available before any workflow starts.
pub fn check_git_available() -> Result<()> {
    match runner::run_git(&["--version"], Path::new(".")) {
        Ok(output) if output.status.success() => Ok(()),
        _ => bail!("git is not available. Please install git and ensure it's in PATH."),
    }
}
