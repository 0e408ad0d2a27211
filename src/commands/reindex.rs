use crate::core::{
    command_init::CommandInit,
    error::Result,
    execute::{git, split_nul},
};

/// Re-adds every staged path so the index picks up its current working tree content
///
/// Staged deletions are left alone; there is nothing on disk to add.
pub fn execute_reindex() -> Result<()> {
    let repo = CommandInit::require_commits("reindex")?;
    CommandInit::enter_toplevel(&repo)?;

    let listing = git(["diff", "--cached", "--name-only", "-z", "--diff-filter=d"]).checked()?;
    let files = split_nul(&listing);
    if files.is_empty() {
        log::debug!("nothing staged to reindex");
        return Ok(());
    }

    git(["add", "--"]).args(&files).checked()?;
    Ok(())
}
