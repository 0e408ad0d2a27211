//! Test data generation utilities and predefined scenarios
//!
//! Provides functions for creating repositories with specific stash and file states
//! to test the stash workflows consistently.

#![allow(dead_code)]

use super::repository::*;
use git_tools::core::error::Result;
use std::fs;

/// Scenario: `count` stashes, each changing `initial.txt` differently
///
/// Returns their commit ids newest first, matching `stash@{0}..stash@{count-1}`.
pub fn create_stash_repo(count: usize) -> Result<(TestRepo, Vec<String>)> {
    let repo = setup_test_repo_with_initial_commit()?;

    for i in 0..count {
        create_file(&repo.path, "initial.txt", &format!("change {i}\n"))?;
        repo.git(&["stash", "push", "--quiet", "--message", format!("stash {i}").as_str()])?;
    }

    let shas = (0..count)
        .map(|i| repo.stash_sha(i))
        .collect::<Result<Vec<_>>>()?;
    Ok((repo, shas))
}

/// Scenario: every kind of change at once
///
/// ```text
/// MM CHANGELOG.md
/// M  CONTRIBUTING.md
///  M README.md
/// D  file1.txt
///  D file2.txt
/// A  file3.txt
/// ?? file4.txt
/// ```
pub fn create_mixed_changes_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;
    commit_test_files(
        &repo,
        &[
            "CHANGELOG.md",
            "CONTRIBUTING.md",
            "README.md",
            "file1.txt",
            "file2.txt",
        ],
    )?;

    create_file(&repo.path, "CHANGELOG.md", "staged changelog\n")?;
    git_add(&repo, "CHANGELOG.md")?;
    create_file(&repo.path, "CHANGELOG.md", "staged changelog\nunstaged line\n")?;

    create_file(&repo.path, "CONTRIBUTING.md", "staged contributing\n")?;
    git_add(&repo, "CONTRIBUTING.md")?;

    create_file(&repo.path, "README.md", "unstaged readme\n")?;

    repo.git(&["rm", "--quiet", "file1.txt"])?;
    remove_file(&repo.path, "file2.txt")?;

    create_file(&repo.path, "file3.txt", "added\n")?;
    git_add(&repo, "file3.txt")?;

    create_file(&repo.path, "file4.txt", "untracked\n")?;

    Ok(repo)
}

/// Scenario: committed files at the top and in `sub/`, all of them modified
///
/// ```text
///  M sub/a.txt
///  M sub/b.txt
///  M top.txt
/// ```
pub fn create_nested_changes_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;
    fs::create_dir(repo.path.join("sub"))?;
    commit_test_files(&repo, &["top.txt", "sub/a.txt", "sub/b.txt"])?;

    create_file(&repo.path, "top.txt", "changed top\n")?;
    create_file(&repo.path, "sub/a.txt", "changed a\n")?;
    create_file(&repo.path, "sub/b.txt", "changed b\n")?;

    Ok(repo)
}
