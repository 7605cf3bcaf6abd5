//! Checkout recovery controller
//!
//! Switching branches with uncommitted work in the tree is the most common
//! way an interactive check-in stalls. This module owns the retry loop
//! around that failure: attempt the switch, classify the diagnostic, and
//! when the failure is the recoverable dirty-worktree kind, walk the
//! operator through commit-in-place, stash, destructive discard, or abort
//! until the switch lands or the run stops.

use anyhow::{Error, Result};
use colored::Colorize;
use std::path::Path;
use tracing::warn;

use crate::git::runner::{echo_git, run_git, GitFailure};
use crate::git::status::working_tree_status;
use crate::git::worktree::{clean_untracked, reset_hard, stash_push};
use crate::ignore::append_to_ignore_file;
use crate::prompt::Prompter;

/// Label attached to every recovery stash, fixed so weft's entries are
/// recognizable in `git stash list`.
pub const STASH_LABEL: &str = "weft checkout autostash";

/// Diagnostic fragments git emits when uncommitted changes block a branch
/// switch. Substring matching on purpose: git exposes no structured code
/// for this case. Both the tracked-changes and untracked-files refusals
/// are covered; swap here if git ever changes its wording.
const DIRTY_TREE_MARKERS: [&str; 2] = [
    "would be overwritten by checkout",
    "commit your changes or stash them",
];

/// How a checkout request ended, short of a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The working tree is now on the target branch.
    Switched,
    /// The operator kept their changes and stayed on the current branch;
    /// the caller should carry on there.
    SkipRequested,
    /// The operator chose to stop. Not an error.
    Aborted,
}

/// Strategy picked from the recovery menu for one blocked switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecoveryChoice {
    CommitHere,
    Stash,
    Discard,
    Abort,
}

/// Result of one raw `git switch` invocation.
enum CheckoutAttempt {
    Success,
    /// Refused because of uncommitted changes; recoverable.
    Blocked {
        diagnostic: String,
        code: Option<i32>,
    },
    /// Any other failure; not recoverable here.
    Failed {
        diagnostic: String,
        code: Option<i32>,
    },
}

/// True when a checkout diagnostic is the recoverable dirty-worktree kind.
pub fn is_dirty_tree_failure(diagnostic: &str) -> bool {
    DIRTY_TREE_MARKERS
        .iter()
        .any(|marker| diagnostic.contains(marker))
}

/// Switch the working tree to `target`, creating the branch when
/// `create_new` is set, and recover interactively when uncommitted changes
/// block the switch.
///
/// Only the dirty-worktree refusal is recoverable. Everything else, and
/// any failure of a retry that follows a successful recovery action, is
/// returned as an error carrying [`GitFailure`] so the process can mirror
/// git's exit code.
pub fn attempt_checkout(
    target: &str,
    create_new: bool,
    repo_root: &Path,
    prompter: &mut dyn Prompter,
) -> Result<CheckoutOutcome> {
    match run_checkout(target, create_new, repo_root)? {
        CheckoutAttempt::Success => return Ok(CheckoutOutcome::Switched),
        CheckoutAttempt::Failed { diagnostic, code } => {
            return Err(checkout_failure(target, create_new, diagnostic, code).into());
        }
        CheckoutAttempt::Blocked { diagnostic, .. } => {
            println!("{}", diagnostic.yellow());
        }
    }

    // Blocked. Keep offering strategies until one resolves the switch or
    // the operator walks away.
    loop {
        match prompt_recovery_choice(target, repo_root, prompter)? {
            RecoveryChoice::CommitHere => {
                println!("Keeping changes; staying on the current branch.");
                return Ok(CheckoutOutcome::SkipRequested);
            }
            RecoveryChoice::Abort => {
                return Ok(CheckoutOutcome::Aborted);
            }
            RecoveryChoice::Stash => {
                if let Err(err) = stash_push(STASH_LABEL, repo_root) {
                    println!("{} Stash failed: {err:#}", "⚠".yellow().bold());
                    continue;
                }
                let outcome = retry_checkout(target, create_new, repo_root, "stash")?;
                println!(
                    "{} Changes stashed; restore them later with 'git stash pop'",
                    "✓".green().bold()
                );
                return Ok(outcome);
            }
            RecoveryChoice::Discard => {
                if !confirm_discard(prompter)? {
                    println!("Discard not confirmed.");
                    continue;
                }
                offer_ignore_append(repo_root, prompter)?;
                reset_hard(repo_root)?;
                clean_untracked(repo_root)?;
                return retry_checkout(target, create_new, repo_root, "discard");
            }
        }
    }
}

/// Exactly one automatic retry after a successful recovery action. A
/// second failure, whatever its kind, means the tree is in a state this
/// flow cannot reason about, and the operator takes over.
fn retry_checkout(
    target: &str,
    create_new: bool,
    repo_root: &Path,
    after: &str,
) -> Result<CheckoutOutcome> {
    match run_checkout(target, create_new, repo_root)? {
        CheckoutAttempt::Success => Ok(CheckoutOutcome::Switched),
        CheckoutAttempt::Blocked { diagnostic, code }
        | CheckoutAttempt::Failed { diagnostic, code } => {
            Err(
                Error::new(checkout_failure(target, create_new, diagnostic, code)).context(
                    format!("Switch to '{target}' still failing after {after}; resolve the working tree manually"),
                ),
            )
        }
    }
}

fn run_checkout(target: &str, create_new: bool, repo_root: &Path) -> Result<CheckoutAttempt> {
    let args: Vec<&str> = if create_new {
        vec!["switch", "-c", target]
    } else {
        vec!["switch", target]
    };
    echo_git(&args);

    let output = run_git(&args, repo_root)?;
    let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if output.status.success() {
        // `git switch` narrates on stderr ("Switched to branch ...").
        if !diagnostic.is_empty() {
            println!("{diagnostic}");
        }
        return Ok(CheckoutAttempt::Success);
    }

    let code = output.status.code();
    if is_dirty_tree_failure(&diagnostic) {
        Ok(CheckoutAttempt::Blocked { diagnostic, code })
    } else {
        Ok(CheckoutAttempt::Failed { diagnostic, code })
    }
}

fn checkout_failure(
    target: &str,
    create_new: bool,
    diagnostic: String,
    code: Option<i32>,
) -> GitFailure {
    let command = if create_new {
        format!("switch -c {target}")
    } else {
        format!("switch {target}")
    };
    GitFailure {
        command,
        code,
        stderr: diagnostic,
    }
}

/// Show what is blocking the switch and read one of the four strategies.
/// The file list is recomputed on every pass; a failed stash attempt may
/// have changed the tree since the last one.
fn prompt_recovery_choice(
    target: &str,
    repo_root: &Path,
    prompter: &mut dyn Prompter,
) -> Result<RecoveryChoice> {
    loop {
        let files = working_tree_status(repo_root)?.changed_files();

        println!();
        println!(
            "Uncommitted changes are blocking the switch to '{}':",
            target.cyan()
        );
        for file in &files {
            println!("  {file}");
        }
        println!();
        println!("  1) commit here - keep the changes and commit on the current branch");
        println!("  2) stash       - stash the changes, then retry the switch");
        println!("  3) discard     - reset and clean the working tree (destructive)");
        println!("  4) abort       - stop without touching anything");

        let answer = prompter.line("Choose [1-4]: ")?;
        match answer.as_str() {
            "1" => return Ok(RecoveryChoice::CommitHere),
            "2" => return Ok(RecoveryChoice::Stash),
            "3" => return Ok(RecoveryChoice::Discard),
            "4" => return Ok(RecoveryChoice::Abort),
            other => println!("Invalid choice '{other}'. Enter 1, 2, 3, or 4."),
        }
    }
}

/// The destructive path requires the literal uppercase YES, a higher bar
/// than the y/N convention used everywhere else.
fn confirm_discard(prompter: &mut dyn Prompter) -> Result<bool> {
    let answer = prompter.line(
        "Discard ALL local changes? This cannot be undone. Type YES to confirm: ",
    )?;
    Ok(answer == "YES")
}

/// Offer to record the doomed paths in `.gitignore` before they go. A
/// write failure is reported and the discard continues; the operator
/// already confirmed it.
fn offer_ignore_append(repo_root: &Path, prompter: &mut dyn Prompter) -> Result<()> {
    if !prompter.confirm("Add the changed paths to .gitignore first?")? {
        return Ok(());
    }
    let files = working_tree_status(repo_root)?.changed_files();
    if files.is_empty() {
        return Ok(());
    }
    if let Err(err) = append_to_ignore_file(&files, repo_root) {
        warn!(error = %err, "could not update .gitignore");
        println!("{} Could not update .gitignore: {err:#}", "⚠".yellow().bold());
    }
    Ok(())
}
