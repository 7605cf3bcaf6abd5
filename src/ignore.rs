//! Ignore-list maintenance for the destructive discard path

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Header written above every appended block, so the additions are easy to
/// find and prune later.
pub const IGNORE_HEADER: &str = "# added by weft before discard";

/// Append `paths` to the repository's `.gitignore`, one per line under
/// [`IGNORE_HEADER`]. Creates the file if it does not exist.
///
/// Callers treat a failure here as a warning: an unwritable ignore file
/// must not block the discard the operator already confirmed.
pub fn append_to_ignore_file(paths: &[String], repo_root: &Path) -> Result<()> {
    let ignore_path = repo_root.join(".gitignore");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&ignore_path)
        .with_context(|| format!("Failed to open {}", ignore_path.display()))?;

    let mut block = String::from("\n");
    block.push_str(IGNORE_HEADER);
    block.push('\n');
    for path in paths {
        block.push_str(path);
        block.push('\n');
    }

    file.write_all(block.as_bytes())
        .with_context(|| format!("Failed to append to {}", ignore_path.display()))?;
    Ok(())
}
