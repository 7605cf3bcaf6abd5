//! Interactive check-in: branch, stage, commit, push
//! Usage: weft check-in [--branch develop] [--remote origin]

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use crate::checkout::{attempt_checkout, CheckoutOutcome};
use crate::git;
use crate::prompt::{Prompter, TerminalPrompter};

/// Branches the check-in flow refuses to push. Feature work goes out on
/// feature branches; the integration branch and the usual mainlines only
/// move through reviewed merges.
fn is_protected_branch(name: &str, integration: &str) -> bool {
    name == integration || name == "main" || name == "master"
}

pub fn execute(integration: String, remote: String) -> Result<()> {
    git::check_git_available()?;

    let cwd = std::env::current_dir()?;
    if !git::is_inside_work_tree(&cwd) {
        bail!("Not inside a git work tree");
    }
    let repo_root = git::repo_root(&cwd)?;

    let mut prompter = TerminalPrompter;
    run(&integration, &remote, &repo_root, &mut prompter)
}

/// The check-in flow proper, separated from terminal wiring so scripted
/// answer sources can drive it end to end.
pub fn run(
    integration: &str,
    remote: &str,
    repo_root: &Path,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let mut branch = git::current_branch(repo_root)?;
    println!("Current branch: {}", branch.cyan());

    // Offer to refresh the integration branch before deciding where this
    // commit lands.
    if branch != integration {
        let question =
            format!("You are not on '{integration}'. Switch and pull '{integration}' first?");
        if prompter.confirm(&question)? {
            match attempt_checkout(integration, false, repo_root, prompter)? {
                CheckoutOutcome::Switched => {
                    git::pull(remote, integration, repo_root)?;
                    ensure_no_conflicts(repo_root, &format!("after pulling '{integration}'"))?;
                    branch = integration.to_string();
                }
                CheckoutOutcome::SkipRequested => {
                    println!("Staying on '{branch}'; skipping the pull.");
                }
                CheckoutOutcome::Aborted => return abort_requested(),
            }
        }
    }

    // From the integration branch, feature work needs a branch of its own.
    let branch = if branch == integration {
        match choose_feature_branch(integration, remote, repo_root, prompter)? {
            Some(name) => name,
            None => return abort_requested(),
        }
    } else {
        println!("Working on existing branch '{}'.", branch.cyan());
        branch
    };

    let files = git::working_tree_status(repo_root)?.changed_files();
    if files.is_empty() {
        println!("No changed files to commit.");
        return Ok(());
    }

    println!("Files to be staged:");
    for file in &files {
        println!("  {file}");
    }
    if !prompter.confirm("Stage these files?")? {
        return abort_requested();
    }
    git::stage(&files, repo_root)?;

    let message = compose_commit_message(prompter)?;
    git::commit(&message, repo_root)?;

    let pushed = if prompter.confirm(&format!("Push '{branch}' to '{remote}'?"))? {
        if is_protected_branch(&branch, integration) {
            bail!("Refusing to push protected branch '{branch}'; create a feature branch instead");
        }
        git::push(remote, &branch, repo_root)?;
        true
    } else {
        println!("Commit created but not pushed.");
        false
    };

    print_summary(&branch, pushed);
    Ok(())
}

/// Pick or create the branch this check-in lands on, starting from the
/// integration branch. Returns the effective branch, which can differ from
/// the requested name when a blocked switch ends in commit-in-place, or
/// `None` when the operator aborts.
fn choose_feature_branch(
    integration: &str,
    remote: &str,
    repo_root: &Path,
    prompter: &mut dyn Prompter,
) -> Result<Option<String>> {
    let name = prompter.required_line("Enter a branch name for this check-in: ", "Branch name")?;

    if git::branch_exists(&name, repo_root) {
        println!("Branch '{}' already exists.", name.cyan());
        if prompter.confirm("Switch to the existing branch?")? {
            return match attempt_checkout(&name, false, repo_root, prompter)? {
                CheckoutOutcome::Switched => {
                    sync_with_integration(&name, integration, remote, repo_root, prompter)
                }
                CheckoutOutcome::SkipRequested => Ok(Some(git::current_branch(repo_root)?)),
                CheckoutOutcome::Aborted => Ok(None),
            };
        }

        let unique = git::unique_branch_name(&name, repo_root);
        println!("Creating '{}' instead.", unique.cyan());
        return checkout_new(&unique, repo_root, prompter);
    }

    checkout_new(&name, repo_root, prompter)
}

fn checkout_new(
    name: &str,
    repo_root: &Path,
    prompter: &mut dyn Prompter,
) -> Result<Option<String>> {
    match attempt_checkout(name, true, repo_root, prompter)? {
        CheckoutOutcome::Switched => Ok(Some(name.to_string())),
        CheckoutOutcome::SkipRequested => Ok(Some(git::current_branch(repo_root)?)),
        CheckoutOutcome::Aborted => Ok(None),
    }
}

/// Bring an existing feature branch up to date with the integration
/// branch: refresh the integration branch from the remote, come back, and
/// merge it in unless it is already an ancestor.
///
/// Returns the effective branch, or `None` when the operator aborts a
/// blocked switch along the way.
fn sync_with_integration(
    target: &str,
    integration: &str,
    remote: &str,
    repo_root: &Path,
    prompter: &mut dyn Prompter,
) -> Result<Option<String>> {
    git::fetch(remote, integration, repo_root)?;

    match attempt_checkout(integration, false, repo_root, prompter)? {
        CheckoutOutcome::Switched => {}
        CheckoutOutcome::SkipRequested => {
            println!("Skipping the sync with '{integration}'.");
            return Ok(Some(target.to_string()));
        }
        CheckoutOutcome::Aborted => return Ok(None),
    }
    git::pull(remote, integration, repo_root)?;
    ensure_no_conflicts(repo_root, &format!("after pulling '{integration}'"))?;

    match attempt_checkout(target, false, repo_root, prompter)? {
        CheckoutOutcome::Switched => {}
        CheckoutOutcome::SkipRequested => {
            // The way back is blocked and the operator chose to commit
            // where they stand.
            return Ok(Some(git::current_branch(repo_root)?));
        }
        CheckoutOutcome::Aborted => return Ok(None),
    }

    if git::is_ancestor_of(integration, target, repo_root) {
        println!("'{target}' already contains '{integration}'.");
    } else {
        git::merge(integration, repo_root)?;
        ensure_no_conflicts(
            repo_root,
            &format!("while merging '{integration}' into '{target}'"),
        )?;
    }

    Ok(Some(target.to_string()))
}

/// Conflict markers anywhere in the tree end the run; resolving them is
/// the operator's job.
fn ensure_no_conflicts(repo_root: &Path, when: &str) -> Result<()> {
    if git::working_tree_status(repo_root)?.has_conflicts() {
        bail!("Merge conflicts detected {when}. Resolve them manually and rerun.");
    }
    Ok(())
}

/// Build the `feat(<id>): <description>` message, re-prompting as often as
/// the operator rejects the preview.
fn compose_commit_message(prompter: &mut dyn Prompter) -> Result<String> {
    loop {
        let feature_id = prompter.line("Feature or issue ID (blank for none): ")?;
        let description = prompter.required_line("Commit description: ", "Commit description")?;

        let message = if feature_id.is_empty() {
            format!("feat: {description}")
        } else {
            format!("feat({feature_id}): {description}")
        };

        println!("Commit message: {}", message.cyan());
        if prompter.confirm("Use this commit message?")? {
            return Ok(message);
        }
    }
}

/// Operator-requested abort. Reported, then the process ends cleanly.
fn abort_requested() -> Result<()> {
    println!("Aborted. Nothing further was done.");
    Ok(())
}

fn print_summary(branch: &str, pushed: bool) {
    println!();
    if pushed {
        println!(
            "{} Checked in and pushed '{}'",
            "✓".green().bold(),
            branch.cyan()
        );
    } else {
        println!(
            "{} Checked in on '{}' (not pushed)",
            "✓".green().bold(),
            branch.cyan()
        );
    }
}
