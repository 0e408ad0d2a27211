use crate::core::{
    command_init::CommandInit,
    error::{GitToolsError, Result},
    execute::git,
    output::print_block,
};

/// Commits the staged changes as a `fixup!` of `commit` (default HEAD)
pub fn execute_fixup(commit: Option<String>, quiet: bool) -> Result<()> {
    CommandInit::require_commits("fixup")?;

    if git(["diff", "--cached", "--quiet"]).succeeds() {
        return Err(GitToolsError::NothingStaged);
    }

    let commit = commit.unwrap_or_else(|| "HEAD".to_string());
    let mut command = git(["commit", "--fixup"]).arg(&commit);
    if quiet {
        command = command.arg("--quiet");
    }
    let output = command.checked()?;
    print_block(&output)?;
    Ok(())
}
