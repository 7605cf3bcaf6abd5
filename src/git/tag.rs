//! Tag queries and mutations for the release flow

use anyhow::Result;
use std::path::Path;

use super::runner::{run_git, run_git_bool, run_git_streamed_checked};

/// Check if a tag exists locally.
pub fn tag_exists(tag: &str, repo_root: &Path) -> bool {
    let ref_path = format!("refs/tags/{tag}");
    run_git_bool(&["rev-parse", "-q", "--verify", &ref_path], repo_root)
}

/// Create an annotated tag at HEAD.
pub fn create_annotated_tag(tag: &str, message: &str, repo_root: &Path) -> Result<()> {
    run_git_streamed_checked(&["tag", "-a", tag, "-m", message], repo_root)
}

/// Delete a local tag, best effort. A missing tag is not an error; the
/// force-replace path calls this without caring whether anything was there.
pub fn delete_tag(tag: &str, repo_root: &Path) {
    let _ = run_git(&["tag", "-d", tag], repo_root);
}
