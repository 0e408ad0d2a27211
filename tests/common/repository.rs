//! Git repository management and setup utilities
//!
//! Every test repository gets its own global and system config files inside a
//! temporary directory, so settings written by one test (or by the machine running the
//! tests) never leak into another.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use git_tools::core::error::{GitToolsError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test repository setup result. Both temporary directories must be kept alive for
/// the duration of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub config_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// Get the repository path as a reference
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn global_config(&self) -> PathBuf {
        self.config_dir.path().join("global.gitconfig")
    }

    pub fn system_config(&self) -> PathBuf {
        self.config_dir.path().join("system.gitconfig")
    }

    fn isolate(&self, cmd: &mut Command) {
        cmd.current_dir(&self.path)
            .env("HOME", self.config_dir.path())
            .env("GIT_CONFIG_GLOBAL", self.global_config())
            .env("GIT_CONFIG_SYSTEM", self.system_config())
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE");
    }

    /// The git-tools binary, running inside this repository
    pub fn cmd(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("git-tools")
            .map_err(|e| GitToolsError::command_failed("git-tools", e.to_string()))?;
        self.isolate(&mut cmd);
        Ok(cmd)
    }

    /// The git-tools binary, running from `subdir` of this repository
    pub fn cmd_in(&self, subdir: &str) -> Result<Command> {
        let mut cmd = self.cmd()?;
        cmd.current_dir(self.path.join(subdir));
        Ok(cmd)
    }

    /// Runs git in this repository, failing on a non-zero exit status
    pub fn git(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        self.isolate(&mut cmd);
        let output = cmd.output()?;
        if !output.status.success() {
            return Err(GitToolsError::command_failed(
                format!("git {}", args.join(" ")),
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// `git status --porcelain` output
    pub fn status(&self) -> Result<String> {
        self.git(&["status", "--porcelain"])
    }

    /// Subjects of every stash, newest first
    pub fn stash_subjects(&self) -> Result<Vec<String>> {
        Ok(self
            .git(&["stash", "list", "--format=%gs"])?
            .lines()
            .map(str::to_string)
            .collect())
    }

    pub fn stash_count(&self) -> Result<usize> {
        Ok(self.stash_subjects()?.len())
    }

    /// Commit id of `stash@{index}`
    pub fn stash_sha(&self, index: usize) -> Result<String> {
        Ok(self
            .git(&["rev-parse", format!("stash@{{{index}}}").as_str()])?
            .trim()
            .to_string())
    }

    pub fn set_config(&self, key: &str, value: &str) -> Result<()> {
        self.git(&["config", key, value])?;
        Ok(())
    }

    pub fn read_file(&self, filename: &str) -> Result<String> {
        Ok(fs::read_to_string(self.path.join(filename))?)
    }

    pub fn file_exists(&self, filename: &str) -> bool {
        self.path.join(filename).exists()
    }
}

/// Sets up a fresh git repository for testing
///
/// Creates a temporary directory, initializes it as a git repository on `master`,
/// and sets up basic git configuration to avoid user prompts.
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let config_dir = TempDir::new()?;
    let repo = TestRepo {
        path: temp_dir.path().to_path_buf(),
        temp_dir,
        config_dir,
    };

    fs::write(repo.global_config(), "")?;
    fs::write(repo.system_config(), "")?;

    repo.git(&["init", "--quiet", "--initial-branch=master"])?;
    repo.set_config("user.name", "Test User")?;
    repo.set_config("user.email", "test@example.com")?;
    repo.set_config("commit.gpgsign", "false")?;

    Ok(repo)
}

/// Sets up a git repository with an initial commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo, "initial.txt")?;
    git_commit(&repo, "Initial commit")?;

    Ok(repo)
}

/// Creates a file with specified content in the repository
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content)?;
    Ok(())
}

/// Removes a file from the filesystem (not from git)
pub fn remove_file(repo_path: &Path, filename: &str) -> Result<()> {
    fs::remove_file(repo_path.join(filename))?;
    Ok(())
}

/// Adds a file to the git index ("." for all files)
pub fn git_add(repo: &TestRepo, filename: &str) -> Result<()> {
    repo.git(&["add", filename])?;
    Ok(())
}

/// Creates a git commit with the specified message
pub fn git_commit(repo: &TestRepo, message: &str) -> Result<()> {
    repo.git(&["commit", "--quiet", "-m", message])?;
    Ok(())
}

/// Creates and commits several files with sequential content
pub fn commit_test_files(repo: &TestRepo, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        create_file(&repo.path, filename, &format!("content{}\nline 2\n", i + 1))?;
        git_add(repo, filename)?;
    }
    git_commit(repo, "Add test files")
}
