//! Git state for the first line, gathered by shelling out to `git`.
//!
//! Everything here degrades to the empty status: outside a repository (or
//! without git on PATH) the branch fragment simply disappears from the
//! rendered line.

use std::path::Path;
use std::process::Command;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeCounts {
    pub added: u64,
    pub deleted: u64,
    pub files: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GitStatus {
    pub branch: String,
    pub has_changes: bool,
    pub staged: ChangeCounts,
    pub unstaged: ChangeCounts,
}

/// Collect branch name, dirty flag and staged/unstaged counts for `dir`.
pub fn git_status(dir: &Path) -> GitStatus {
    let Some(branch) = current_branch(dir) else {
        return GitStatus::default();
    };

    let has_changes = git_stdout(dir, &["status", "--porcelain"])
        .map(|out| !out.trim().is_empty())
        .unwrap_or(false);

    let staged = git_stdout(dir, &["diff", "--numstat", "--cached"])
        .map(|out| parse_numstat(&out))
        .unwrap_or_default();
    let unstaged = git_stdout(dir, &["diff", "--numstat"])
        .map(|out| parse_numstat(&out))
        .unwrap_or_default();

    GitStatus {
        branch,
        has_changes,
        staged,
        unstaged,
    }
}

/// Current branch name, or the short commit hash when detached. `None`
/// outside a repository.
fn current_branch(dir: &Path) -> Option<String> {
    let head = git_stdout(dir, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    let head = head.trim();
    if head.is_empty() {
        return None;
    }
    if head == "HEAD" {
        // Detached: fall back to the short hash.
        return git_stdout(dir, &["rev-parse", "--short", "HEAD"])
            .map(|s| s.trim().to_string());
    }
    Some(head.to_string())
}

fn git_stdout(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Sum a `git diff --numstat` listing into line and file counts. Binary
/// files report `-` columns and count as a touched file with no lines.
fn parse_numstat(out: &str) -> ChangeCounts {
    let mut counts = ChangeCounts::default();
    for line in out.lines() {
        let mut cols = line.split('\t');
        let (Some(added), Some(deleted)) = (cols.next(), cols.next()) else {
            continue;
        };
        counts.files += 1;
        counts.added += added.trim().parse::<u64>().unwrap_or(0);
        counts.deleted += deleted.trim().parse::<u64>().unwrap_or(0);
    }
    counts
}
