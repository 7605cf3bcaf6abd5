//! E2E tests for the checkout recovery controller
//!
//! Each test sets up a repository, scripts the operator's answers, and
//! checks both the reported outcome and the state git was left in.

use weft::checkout::{attempt_checkout, CheckoutOutcome, STASH_LABEL};
use weft::git::GitFailure;
use weft::prompt::ScriptedPrompter;

use super::helpers::{
    current_branch_of, git, init_repo, init_repo_with_blocking_change, porcelain, read_file,
    stash_count,
};

#[test]
fn test_clean_switch_consumes_no_prompts() {
    let repo = init_repo();
    git(&["branch", "feature"], repo.path());

    // A canned answer that must never be consumed.
    let mut prompter = ScriptedPrompter::new(["4"]);
    let outcome = attempt_checkout("feature", false, repo.path(), &mut prompter).unwrap();

    assert_eq!(outcome, CheckoutOutcome::Switched);
    assert_eq!(prompter.remaining(), 1, "no prompt should have been issued");
    assert_eq!(current_branch_of(repo.path()), "feature");
}

#[test]
fn test_create_new_branch_switches() {
    let repo = init_repo();

    let mut prompter = ScriptedPrompter::default();
    let outcome = attempt_checkout("topic", true, repo.path(), &mut prompter).unwrap();

    assert_eq!(outcome, CheckoutOutcome::Switched);
    assert_eq!(current_branch_of(repo.path()), "topic");
}

#[test]
fn test_unknown_branch_is_fatal_with_git_code() {
    let repo = init_repo();

    let mut prompter = ScriptedPrompter::default();
    let err = attempt_checkout("no-such-branch", false, repo.path(), &mut prompter).unwrap_err();

    let failure = err
        .downcast_ref::<GitFailure>()
        .expect("failure should carry the git exit code");
    assert!(failure.code.is_some());
    assert_ne!(failure.code, Some(0));
    assert_eq!(current_branch_of(repo.path()), "develop");
}

#[test]
fn test_creating_branch_that_exists_is_fatal() {
    let repo = init_repo();
    git(&["branch", "feature"], repo.path());

    let mut prompter = ScriptedPrompter::default();
    let err = attempt_checkout("feature", true, repo.path(), &mut prompter).unwrap_err();

    assert!(err.downcast_ref::<GitFailure>().is_some());
    assert_eq!(current_branch_of(repo.path()), "develop");
}

#[test]
fn test_blocked_switch_abort_touches_nothing() {
    let repo = init_repo_with_blocking_change();

    let mut prompter = ScriptedPrompter::new(["4"]);
    let outcome = attempt_checkout("feature", false, repo.path(), &mut prompter).unwrap();

    assert_eq!(outcome, CheckoutOutcome::Aborted);
    assert_eq!(current_branch_of(repo.path()), "develop");
    assert_eq!(read_file(repo.path(), "README.md"), "# local edit\n");
    assert_eq!(stash_count(repo.path()), 0);
}

#[test]
fn test_blocked_switch_commit_here_keeps_changes() {
    let repo = init_repo_with_blocking_change();

    let mut prompter = ScriptedPrompter::new(["1"]);
    let outcome = attempt_checkout("feature", false, repo.path(), &mut prompter).unwrap();

    assert_eq!(outcome, CheckoutOutcome::SkipRequested);
    assert_eq!(current_branch_of(repo.path()), "develop");
    assert_eq!(read_file(repo.path(), "README.md"), "# local edit\n");
    assert!(!porcelain(repo.path()).is_empty(), "changes must survive");
    assert_eq!(stash_count(repo.path()), 0);
}

#[test]
fn test_invalid_menu_input_reprompts() {
    let repo = init_repo_with_blocking_change();

    let mut prompter = ScriptedPrompter::new(["7", "banana", "4"]);
    let outcome = attempt_checkout("feature", false, repo.path(), &mut prompter).unwrap();

    assert_eq!(outcome, CheckoutOutcome::Aborted);
    assert_eq!(prompter.remaining(), 0);
    assert_eq!(read_file(repo.path(), "README.md"), "# local edit\n");
}

#[test]
fn test_stash_recovers_blocked_switch() {
    let repo = init_repo_with_blocking_change();

    let mut prompter = ScriptedPrompter::new(["2"]);
    let outcome = attempt_checkout("feature", false, repo.path(), &mut prompter).unwrap();

    assert_eq!(outcome, CheckoutOutcome::Switched);
    assert_eq!(current_branch_of(repo.path()), "feature");
    assert_eq!(read_file(repo.path(), "README.md"), "# feature\n");

    assert_eq!(stash_count(repo.path()), 1);
    let listing = git(&["stash", "list"], repo.path());
    assert!(listing.contains(STASH_LABEL), "stash should carry the fixed label: {listing}");
    let stashed = git(&["stash", "show", "--name-only"], repo.path());
    assert!(stashed.contains("README.md"), "stash should hold the blocking file: {stashed}");
}

#[test]
fn test_stash_includes_untracked_blocker() {
    // An untracked file that exists as a tracked file on the target branch
    // also blocks the switch; the stash has to take it along.
    let repo = init_repo();
    let dir = repo.path();

    git(&["switch", "-c", "feature"], dir);
    super::helpers::write_file(dir, "extra.txt", "tracked on feature\n");
    git(&["add", "extra.txt"], dir);
    git(&["commit", "-m", "Add extra"], dir);

    git(&["switch", "develop"], dir);
    super::helpers::write_file(dir, "extra.txt", "untracked on develop\n");

    let mut prompter = ScriptedPrompter::new(["2"]);
    let outcome = attempt_checkout("feature", false, dir, &mut prompter).unwrap();

    assert_eq!(outcome, CheckoutOutcome::Switched);
    assert_eq!(current_branch_of(dir), "feature");
    assert_eq!(read_file(dir, "extra.txt"), "tracked on feature\n");
    assert_eq!(stash_count(dir), 1);
}

#[test]
fn test_discard_requires_uppercase_yes() {
    let repo = init_repo_with_blocking_change();

    // Lowercase "yes" must not count; the menu comes back and the
    // operator aborts.
    let mut prompter = ScriptedPrompter::new(["3", "yes", "4"]);
    let outcome = attempt_checkout("feature", false, repo.path(), &mut prompter).unwrap();

    assert_eq!(outcome, CheckoutOutcome::Aborted);
    assert_eq!(current_branch_of(repo.path()), "develop");
    assert_eq!(read_file(repo.path(), "README.md"), "# local edit\n");
    assert_eq!(stash_count(repo.path()), 0);
}

#[test]
fn test_discard_recovers_blocked_switch() {
    let repo = init_repo_with_blocking_change();

    // "3" discard, "YES" confirm, "n" to skip the .gitignore offer.
    let mut prompter = ScriptedPrompter::new(["3", "YES", "n"]);
    let outcome = attempt_checkout("feature", false, repo.path(), &mut prompter).unwrap();

    assert_eq!(outcome, CheckoutOutcome::Switched);
    assert_eq!(current_branch_of(repo.path()), "feature");
    assert_eq!(read_file(repo.path(), "README.md"), "# feature\n");
    assert_eq!(stash_count(repo.path()), 0, "discard must not create a stash");
}

#[test]
fn test_discard_with_ignore_append_still_switches() {
    let repo = init_repo_with_blocking_change();

    let mut prompter = ScriptedPrompter::new(["3", "YES", "y"]);
    let outcome = attempt_checkout("feature", false, repo.path(), &mut prompter).unwrap();

    assert_eq!(outcome, CheckoutOutcome::Switched);
    assert_eq!(current_branch_of(repo.path()), "feature");
    assert!(porcelain(repo.path()).is_empty());
}
