//! Shared git repository fixtures for E2E tests

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run git in `dir` and return trimmed stdout, panicking on failure.
/// Fixture setup and assertions only.
pub fn git(args: &[&str], dir: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn git {args:?}: {e}"));
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Run git in `dir` and report only whether it succeeded.
pub fn git_ok(args: &[&str], dir: &Path) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Fresh repository on branch `develop` with one commit of `README.md`.
pub fn init_repo() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let dir = temp.path();

    git(&["init"], dir);
    git(&["config", "user.email", "test@test.com"], dir);
    git(&["config", "user.name", "Test User"], dir);

    fs::write(dir.join("README.md"), "# test\n").expect("Failed to write README.md");
    git(&["add", "README.md"], dir);
    git(&["commit", "-m", "Initial commit"], dir);
    git(&["branch", "-m", "develop"], dir);

    temp
}

/// Repository plus a bare clone wired up as `origin`, with `develop`
/// already pushed. Keep both TempDirs alive for the duration of the test.
pub fn init_repo_with_remote() -> (TempDir, TempDir) {
    let repo = init_repo();
    let remote = TempDir::new().expect("Failed to create temp directory");

    git(&["init", "--bare"], remote.path());
    let url = remote
        .path()
        .to_str()
        .expect("temp path should be utf-8")
        .to_string();
    git(&["remote", "add", "origin", &url], repo.path());
    git(&["push", "-u", "origin", "develop"], repo.path());

    (repo, remote)
}

/// Repository where `git switch feature` is blocked: `feature` carries a
/// committed `README.md` that differs from `develop`'s, and the working
/// tree on `develop` holds an uncommitted edit to the same file.
pub fn init_repo_with_blocking_change() -> TempDir {
    let temp = init_repo();
    let dir = temp.path();

    git(&["switch", "-c", "feature"], dir);
    fs::write(dir.join("README.md"), "# feature\n").expect("Failed to write README.md");
    git(&["add", "README.md"], dir);
    git(&["commit", "-m", "Feature readme"], dir);

    git(&["switch", "develop"], dir);
    fs::write(dir.join("README.md"), "# local edit\n").expect("Failed to write README.md");

    temp
}

pub fn current_branch_of(dir: &Path) -> String {
    git(&["rev-parse", "--abbrev-ref", "HEAD"], dir)
}

pub fn last_commit_subject(dir: &Path) -> String {
    git(&["log", "-1", "--format=%s"], dir)
}

pub fn commit_count(dir: &Path) -> usize {
    git(&["rev-list", "--count", "HEAD"], dir)
        .parse()
        .expect("rev-list count should be a number")
}

pub fn stash_count(dir: &Path) -> usize {
    let listing = git(&["stash", "list"], dir);
    if listing.is_empty() {
        0
    } else {
        listing.lines().count()
    }
}

pub fn porcelain(dir: &Path) -> String {
    git(&["status", "--porcelain"], dir)
}

pub fn has_tag(dir: &Path, tag: &str) -> bool {
    let ref_path = format!("refs/tags/{tag}");
    git_ok(&["rev-parse", "-q", "--verify", &ref_path], dir)
}

/// Commit sha a tag ultimately points at (through the tag object).
pub fn tag_target(dir: &Path, tag: &str) -> String {
    let rev = format!("{tag}^{{commit}}");
    git(&["rev-parse", &rev], dir)
}

pub fn read_file(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap_or_else(|e| panic!("failed to read {name}: {e}"))
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap_or_else(|e| panic!("failed to write {name}: {e}"));
}
