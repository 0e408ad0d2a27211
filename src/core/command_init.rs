//! Precondition checks shared by every command.
//!
//! Commands start by asking [`CommandInit`] for the repository they operate on, which
//! turns "not in a repository" and "no commits yet" into the same errors everywhere.

use crate::core::{
    error::{GitToolsError, Result},
    execute::git,
    git::GitRepo,
};

pub struct CommandInit;

impl CommandInit {
    /// The repository containing the current directory
    pub fn require_repo() -> Result<GitRepo> {
        let repo = GitRepo::current()?;
        log::debug!("operating in {:?}", repo.workdir());
        Ok(repo)
    }

    /// The repository containing the current directory, which must have a commit
    pub fn require_commits(operation: &str) -> Result<GitRepo> {
        let repo = Self::require_repo()?;
        repo.require_commits(operation)?;
        Ok(repo)
    }

    /// Moves the process to the top of `repo`'s working tree
    ///
    /// `status` and `diff` print root-relative paths while `ls-files` and pathspecs are
    /// relative to the current directory; from the top both agree. Returns the prefix
    /// of the directory the command started in (`sub/dir/`, empty at the top), for
    /// rebasing user pathspecs with [`crate::core::git::rebase_pathspec`].
    pub fn enter_toplevel(repo: &GitRepo) -> Result<String> {
        let prefix = git(["rev-parse", "--show-prefix"]).checked()?;
        let prefix = prefix.trim_end_matches('\n').to_string();
        let toplevel = repo.workdir().ok_or(GitToolsError::NotInGitRepo)?;

        std::env::set_current_dir(&toplevel)?;
        log::debug!("entered {} from {prefix:?}", toplevel.display());
        Ok(prefix)
    }
}
