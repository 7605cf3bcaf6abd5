//! Working tree status parsing
//!
//! Wraps `git status --porcelain` in a typed snapshot. The check-in flow
//! reads the same snapshot three ways: is anything changed at all, is any
//! entry a merge conflict, and which paths should be staged by name.

use anyhow::Result;
use std::path::Path;

use super::runner::run_git_checked_raw;

/// One `git status --porcelain` line: the two status columns and a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Index (staged) column.
    pub index: char,
    /// Working tree column.
    pub worktree: char,
    /// Path relative to the repository root. For renames this is the new
    /// path, the one future operations act on.
    pub path: String,
}

impl StatusEntry {
    /// Conflict combinations the workflows refuse to work over. Kept to
    /// the three both-sides codes; one-sided conflict states resolve
    /// themselves once the operator picks a side.
    pub fn is_conflicted(&self) -> bool {
        matches!(
            (self.index, self.worktree),
            ('U', 'U') | ('A', 'A') | ('D', 'D')
        )
    }

    /// A deletion in either column. Deleted paths are never staged or
    /// listed by name; `git add` on them is at best redundant.
    pub fn is_deletion(&self) -> bool {
        self.index == 'D' || self.worktree == 'D'
    }
}

/// Parsed snapshot of the working tree at one instant.
#[derive(Debug, Clone, Default)]
pub struct WorkingTreeStatus {
    pub entries: Vec<StatusEntry>,
}

impl WorkingTreeStatus {
    /// Parse `git status --porcelain` output. Unparseable lines are
    /// skipped rather than failing the whole snapshot.
    pub fn parse(porcelain: &str) -> Self {
        let entries = porcelain.lines().filter_map(parse_line).collect();
        Self { entries }
    }

    /// True when nothing is modified, staged, or untracked.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when any entry is an unresolved merge conflict.
    pub fn has_conflicts(&self) -> bool {
        self.entries.iter().any(StatusEntry::is_conflicted)
    }

    /// Paths to enumerate and stage, in porcelain order. Deletions are
    /// excluded; untracked files are included.
    pub fn changed_files(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_deletion())
            .map(|entry| entry.path.clone())
            .collect()
    }
}

fn parse_line(line: &str) -> Option<StatusEntry> {
    let mut chars = line.chars();
    let index = chars.next()?;
    let worktree = chars.next()?;
    let rest = line.get(3..)?;
    if rest.is_empty() {
        return None;
    }
    // Rename lines read `R  old -> new`.
    let path = match rest.split_once(" -> ") {
        Some((_, new_path)) => new_path,
        None => rest,
    };
    Some(StatusEntry {
        index,
        worktree,
        path: path.to_string(),
    })
}

/// Snapshot the working tree of `repo_root`.
pub fn working_tree_status(repo_root: &Path) -> Result<WorkingTreeStatus> {
    let stdout = run_git_checked_raw(&["status", "--porcelain"], repo_root)?;
    Ok(WorkingTreeStatus::parse(&stdout))
}
