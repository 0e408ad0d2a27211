//! Repository discovery and the git queries shared between commands.
//!
//! [`GitRepo`] wraps a discovered `git2::Repository` for the precondition checks (are we
//! in a repository, does it have commits). Everything that reads or changes repository
//! state goes through the `git` binary via [`crate::core::execute`], so the output formats
//! the commands rely on are exactly the ones git prints.
//!
//! # Public API
//! - [`GitRepo`]: discovery, emptiness check and branch queries
//! - [`porcelain_status`], [`staged_files`], [`unstaged_files`], [`untracked_files`],
//!   [`deleted_files`]: path listings used by the stash workflows
//! - [`rebase_pathspec`]: re-roots a user pathspec at the top of the working tree

use crate::core::{
    error::{GitToolsError, Result},
    execute::{git, split_nul},
    git_status::StatusEntry,
};
use git2::Repository;
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitRepo { repo })
    }

    /// Opens the repository containing the current directory
    pub fn current() -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::open(&current_dir).map_err(|_| GitToolsError::NotInGitRepo)
    }

    /// Whether the current directory is inside a repository
    pub fn is_inside() -> bool {
        Self::current().is_ok()
    }

    /// Fails with [`GitToolsError::EmptyRepository`] when HEAD has no commits yet
    pub fn require_commits(&self, operation: &str) -> Result<()> {
        if self.repo.is_empty()? {
            return Err(GitToolsError::empty_repository(operation));
        }
        Ok(())
    }

    pub fn workdir(&self) -> Option<PathBuf> {
        self.repo.workdir().map(Path::to_path_buf)
    }

    /// Short name of the checked out branch, `None` when HEAD is detached
    pub fn current_branch(&self) -> Result<Option<String>> {
        let (stdout, status) = git(["symbolic-ref", "--quiet", "--short", "HEAD"]).stdout()?;
        if status != 0 {
            return Ok(None);
        }
        Ok(Some(stdout.trim().to_string()))
    }

    /// Current branch, or an error when HEAD is detached
    pub fn require_branch(&self) -> Result<String> {
        self.current_branch()?.ok_or(GitToolsError::DetachedHead)
    }

    /// Abbreviated HEAD commit, used to describe a detached HEAD
    pub fn head_short_sha(&self) -> Result<Option<String>> {
        let (stdout, status) = git(["rev-parse", "--short", "HEAD"]).stdout()?;
        if status != 0 {
            return Ok(None);
        }
        Ok(Some(stdout.trim().to_string()))
    }

    /// Upstream of `branch` as git abbreviates it (`origin/main`)
    pub fn upstream_of(&self, branch: &str) -> Result<Option<String>> {
        let (stdout, status) = git([
            "rev-parse",
            "--abbrev-ref",
            "--symbolic-full-name",
            format!("{branch}@{{upstream}}").as_str(),
        ])
        .stdout()?;
        if status != 0 || stdout.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(stdout.trim().to_string()))
    }

    /// Whether a local branch with this name exists
    pub fn branch_exists(&self, branch: &str) -> bool {
        git([
            "show-ref",
            "--verify",
            "--quiet",
            format!("refs/heads/{branch}").as_str(),
        ])
        .succeeds()
    }
}

/// Rewrites `pathspec`, given in the directory `prefix`, to apply from the top of the
/// working tree
///
/// Absolute paths and pathspecs with `top` magic (`:/`, `:(top)`) are already rooted.
pub fn rebase_pathspec(prefix: &str, pathspec: &str) -> String {
    if prefix.is_empty() || Path::new(pathspec).is_absolute() {
        return pathspec.to_string();
    }

    let Some(magic) = pathspec.strip_prefix(':') else {
        return format!("{prefix}{pathspec}");
    };

    // Long form: `:(glob,icase)path`
    if let Some(long) = magic.strip_prefix('(') {
        return match long.split_once(')') {
            Some((words, _)) if words.split(',').any(|word| word.trim() == "top") => {
                pathspec.to_string()
            }
            Some((words, path)) => format!(":({words}){prefix}{path}"),
            None => pathspec.to_string(),
        };
    }

    // Short form: `:!path`, `:^path`, optionally closed by a second `:`
    let signs: String = magic.chars().take_while(|c| matches!(c, '!' | '^' | '/')).collect();
    if signs.contains('/') {
        return pathspec.to_string();
    }
    let path = &magic[signs.len()..];
    let path = path.strip_prefix(':').unwrap_or(path);
    format!(":{signs}:{prefix}{path}")
}

/// Porcelain status entries, untracked files listed individually
pub fn porcelain_status(pathspec: &[String]) -> Result<Vec<StatusEntry>> {
    let stdout = git(["status", "--porcelain", "-z", "--untracked-files=all", "--"])
        .args(pathspec)
        .checked()?;
    StatusEntry::parse_all(&stdout)
}

/// Paths with changes staged in the index
pub fn staged_files(pathspec: &[String]) -> Result<Vec<String>> {
    let stdout = git(["diff", "--name-only", "-z", "--no-renames", "--cached", "--"])
        .args(pathspec)
        .checked()?;
    Ok(split_nul(&stdout))
}

/// Paths with working tree changes not yet staged
pub fn unstaged_files(pathspec: &[String]) -> Result<Vec<String>> {
    let stdout = git(["diff", "--name-only", "-z", "--no-renames", "--"])
        .args(pathspec)
        .checked()?;
    Ok(split_nul(&stdout))
}

/// Untracked, non-ignored paths
pub fn untracked_files(pathspec: &[String]) -> Result<Vec<String>> {
    let stdout = git(["ls-files", "-z", "--others", "--exclude-standard", "--"])
        .args(pathspec)
        .checked()?;
    Ok(split_nul(&stdout))
}

/// Paths deleted in the index or in the working tree
pub fn deleted_files() -> Result<Vec<String>> {
    let staged = git([
        "diff",
        "--name-only",
        "-z",
        "--no-renames",
        "--cached",
        "--diff-filter=D",
    ])
    .checked()?;
    let unstaged = git(["ls-files", "-z", "--deleted"]).checked()?;

    let mut files = split_nul(&staged);
    for path in split_nul(&unstaged) {
        if !files.contains(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rebase_pathspec() {
        assert_eq!(rebase_pathspec("", "a.txt"), "a.txt");
        assert_eq!(rebase_pathspec("sub/", "a.txt"), "sub/a.txt");
        assert_eq!(rebase_pathspec("sub/", "../top.txt"), "sub/../top.txt");
        assert_eq!(rebase_pathspec("sub/", "/abs/a.txt"), "/abs/a.txt");
        assert_eq!(rebase_pathspec("sub/", ":/top.txt"), ":/top.txt");
        assert_eq!(rebase_pathspec("sub/", ":(top)top.txt"), ":(top)top.txt");
        assert_eq!(rebase_pathspec("sub/", ":(glob)*.txt"), ":(glob)sub/*.txt");
        assert_eq!(rebase_pathspec("sub/", ":!b.txt"), ":!:sub/b.txt");
        assert_eq!(rebase_pathspec("sub/", ":^:b.txt"), ":^:sub/b.txt");
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(GitRepo::open(temp_dir.path()).is_err());
    }

    #[test]
    fn test_open_and_require_commits_in_empty_repo() -> Result<()> {
        let temp_dir = TempDir::new()?;
        std::process::Command::new("git")
            .args(["init", "--quiet"])
            .current_dir(temp_dir.path())
            .output()?;

        let git_repo = GitRepo::open(temp_dir.path())?;
        let err = git_repo.require_commits("tuck").unwrap_err();
        assert_eq!(err.to_string(), "cannot tuck in an empty repository");
        assert!(git_repo.workdir().is_some());
        Ok(())
    }
}
