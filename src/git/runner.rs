//! Git command runner abstraction
//!
//! Provides centralized functions for running git commands with consistent
//! error handling, reducing boilerplate across the codebase. Interactive
//! workflows echo every mutating command they run (`$ git ...`) so the
//! operator can follow what is being done on their behalf.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::{Command, ExitStatus, Output, Stdio};
use thiserror::Error;
use tracing::debug;

/// A git invocation that exited non-zero.
///
/// Carries the child's exit code so the top level can mirror it as the
/// process exit status. Spawn failures and signal deaths have no code and
/// fall back to 1 there.
#[derive(Debug, Error)]
#[error("git {command} failed{}", describe(.code, .stderr))]
pub struct GitFailure {
    /// Full argument list of the failed invocation, space-joined.
    pub command: String,
    /// Exit code, if the child exited normally.
    pub code: Option<i32>,
    /// Captured stderr; empty for streamed commands, whose stderr already
    /// went to the terminal.
    pub stderr: String,
}

fn describe(code: &Option<i32>, stderr: &str) -> String {
    let mut text = String::new();
    if let Some(code) = code {
        text.push_str(&format!(" (exit {code})"));
    }
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        text.push_str(": ");
        text.push_str(stderr);
    }
    text
}

/// Print the command line the way the interactive flows show their work.
pub(crate) fn echo_git(args: &[&str]) {
    println!("{}", format!("$ git {}", args.join(" ")).dimmed());
}

/// Run a git command and return the raw Output.
///
/// Wraps `Command::new("git")` with `current_dir` and error context.
/// Use this when you need access to both stdout and stderr, or when
/// you need custom error handling logic.
///
/// # Arguments
/// * `args` - Git command arguments (e.g., `&["status", "--porcelain"]`)
/// * `repo_root` - Working directory for the git command
pub fn run_git(args: &[&str], repo_root: &Path) -> Result<Output> {
    debug!(command = %args.join(" "), "running git");
    Command::new("git")
        .args(args)
        .current_dir(repo_root)
        .output()
        .with_context(|| format!("Failed to execute: git {}", args.join(" ")))
}

/// Run a git command, check for success, and return stdout exactly as
/// emitted (no trimming).
///
/// Porcelain output is whitespace-sensitive in its leading columns, so
/// parsers use this variant. On failure, returns a [`GitFailure`] carrying
/// the exit code and captured stderr.
pub fn run_git_checked_raw(args: &[&str], repo_root: &Path) -> Result<String> {
    let output = run_git(args, repo_root)?;
    if !output.status.success() {
        return Err(GitFailure {
            command: args.join(" "),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
        .into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Run a git command, check for success, and return stdout as a trimmed String.
///
/// Use this for commands where you expect success and want the output as
/// a string.
///
/// # Arguments
/// * `args` - Git command arguments
/// * `repo_root` - Working directory for the git command
pub fn run_git_checked(args: &[&str], repo_root: &Path) -> Result<String> {
    Ok(run_git_checked_raw(args, repo_root)?.trim().to_string())
}

/// Run a git command and return true if exit code is 0.
///
/// Silently swallows errors (both spawn failures and non-zero exits).
/// Use this for status checks like `branch_exists`, `rev-parse --verify`, etc.
///
/// # Arguments
/// * `args` - Git command arguments
/// * `repo_root` - Working directory for the git command
pub fn run_git_bool(args: &[&str], repo_root: &Path) -> bool {
    run_git(args, repo_root)
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Run a git command with stdout and stderr attached to the terminal,
/// echoing the command line first.
///
/// Returns the exit status without judging it. Use this for commands whose
/// outcome the caller decides from repository state afterwards (merges,
/// best-effort deletions).
pub fn run_git_streamed(args: &[&str], repo_root: &Path) -> Result<ExitStatus> {
    echo_git(args);
    let status = Command::new("git")
        .args(args)
        .current_dir(repo_root)
        .stdin(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to execute: git {}", args.join(" ")))?;
    debug!(command = %args.join(" "), code = ?status.code(), "git exited");
    Ok(status)
}

/// Like [`run_git_streamed`], but a non-zero exit becomes a [`GitFailure`].
///
/// The failure's stderr field is empty: the command's own stderr already
/// reached the terminal.
pub fn run_git_streamed_checked(args: &[&str], repo_root: &Path) -> Result<()> {
    let status = run_git_streamed(args, repo_root)?;
    if !status.success() {
        return Err(GitFailure {
            command: args.join(" "),
            code: status.code(),
            stderr: String::new(),
        }
        .into());
    }
    Ok(())
}
