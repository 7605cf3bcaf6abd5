//! Annotated release tagging from the integration branch
//! Usage: weft release --version 1.2.3 [--remote origin] [--branch develop]
//!        [--tag-prefix v] [--message <text>] [--force]

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use crate::git;
use crate::validation::validate_version;

/// Parsed release arguments.
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Bare MAJOR.MINOR.PATCH version.
    pub version: String,
    /// Remote the tag is pushed to.
    pub remote: String,
    /// Branch releases are cut from.
    pub branch: String,
    /// Prefix prepended to the version to form the tag name.
    pub tag_prefix: String,
    /// Tag message; defaults to "Release <tag>".
    pub message: Option<String>,
    /// Replace the tag locally and on the remote if it already exists.
    pub force: bool,
}

pub fn execute(opts: ReleaseOptions) -> Result<()> {
    git::check_git_available()?;

    let cwd = std::env::current_dir()?;
    if !git::is_inside_work_tree(&cwd) {
        bail!("Not inside a git work tree");
    }
    let repo_root = git::repo_root(&cwd)?;

    run(&opts, &repo_root)
}

/// The release flow proper: gates first, then refresh, then the tag.
/// No step prompts; a release is fully specified by its arguments.
pub fn run(opts: &ReleaseOptions, repo_root: &Path) -> Result<()> {
    validate_version(&opts.version)?;

    let tag = format!("{}{}", opts.tag_prefix, opts.version);
    let message = opts
        .message
        .clone()
        .unwrap_or_else(|| format!("Release {tag}"));

    let current = git::current_branch(repo_root)?;
    if current != opts.branch {
        bail!(
            "Releases are tagged from '{}'; currently on '{current}'",
            opts.branch
        );
    }
    if !git::working_tree_status(repo_root)?.is_clean() {
        bail!("Working tree is not clean. Commit or stash changes before tagging a release.");
    }

    git::fetch(&opts.remote, &opts.branch, repo_root)?;
    git::pull(&opts.remote, &opts.branch, repo_root)?;

    if git::tag_exists(&tag, repo_root) {
        if !opts.force {
            bail!("Tag '{tag}' already exists. Use --force to replace it.");
        }
        println!(
            "{} Replacing existing tag '{}'",
            "⚠".yellow().bold(),
            tag.cyan()
        );
        git::delete_tag(&tag, repo_root);
        git::delete_remote_tag(&opts.remote, &tag, repo_root);
    }

    git::create_annotated_tag(&tag, &message, repo_root)?;
    git::push(&opts.remote, &tag, repo_root)?;

    println!(
        "{} Created and pushed tag '{}' from '{}'",
        "✓".green().bold(),
        tag.cyan(),
        opts.branch.cyan()
    );
    Ok(())
}
