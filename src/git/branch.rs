//! Branch and repository queries

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::runner::{run_git, run_git_bool, run_git_checked};

/// Check if `dir` is anywhere inside a git work tree.
///
/// `rev-parse --is-inside-work-tree` answers "false" (still exit 0) from
/// inside `.git`, so the printed answer is checked, not just the exit code.
pub fn is_inside_work_tree(dir: &Path) -> bool {
    run_git(&["rev-parse", "--is-inside-work-tree"], dir)
        .map(|output| {
            output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "true"
        })
        .unwrap_or(false)
}

/// Absolute path of the work tree root containing `dir`.
pub fn repo_root(dir: &Path) -> Result<PathBuf> {
    let top = run_git_checked(&["rev-parse", "--show-toplevel"], dir)?;
    Ok(PathBuf::from(top))
}

/// Get the current branch name.
pub fn current_branch(repo_root: &Path) -> Result<String> {
    run_git_checked(&["rev-parse", "--abbrev-ref", "HEAD"], repo_root)
}

/// Check if a local branch exists.
pub fn branch_exists(name: &str, repo_root: &Path) -> bool {
    let ref_path = format!("refs/heads/{name}");
    run_git_bool(&["rev-parse", "--verify", &ref_path], repo_root)
}

/// First free name in the sequence `base`, `base_1`, `base_2`, ...
///
/// Used when the operator asks for a branch name that is already taken
/// but declines to reuse the existing branch.
pub fn unique_branch_name(base: &str, repo_root: &Path) -> String {
    if !branch_exists(base, repo_root) {
        return base.to_string();
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{base}_{suffix}");
        if !branch_exists(&candidate, repo_root) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Check if `ancestor` is reachable from `descendant`.
///
/// When it is, merging `ancestor` into `descendant` would be a no-op and
/// the sync step skips the merge entirely.
pub fn is_ancestor_of(ancestor: &str, descendant: &str, repo_root: &Path) -> bool {
    run_git_bool(
        &["merge-base", "--is-ancestor", ancestor, descendant],
        repo_root,
    )
}
