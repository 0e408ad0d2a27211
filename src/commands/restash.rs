use crate::core::{
    command_init::CommandInit,
    error::{GitToolsError, Result},
    execute::{git, split_nul},
    output::info,
    stash::{self, StashRef},
};

/// Undoes what `git stash apply` did for `reference`
///
/// Tracked changes are removed by applying the stash's patch in reverse; untracked
/// files the stash carried (its third parent) are deleted from the working tree.
pub fn execute_restash(reference: Option<String>, quiet: bool) -> Result<()> {
    let repo = CommandInit::require_repo()?;

    if stash::stash_count()? == 0 {
        return Err(GitToolsError::NoStashes);
    }

    let reference: StashRef = match reference {
        Some(reference) => reference.parse()?,
        None => StashRef(0),
    };
    let sha = stash::require(reference)?;

    // The stash patch and its untracked tree are rooted at the top of the working tree
    CommandInit::enter_toplevel(&repo)?;

    reverse_tracked_changes(reference)?;
    remove_untracked_files(reference)?;

    info(&format!("Restashed {reference} ({sha})"), quiet);
    Ok(())
}

fn reverse_tracked_changes(reference: StashRef) -> Result<()> {
    let patch = git(["stash", "show", "--patch", "--no-color", "--binary"])
        .arg(reference.to_string())
        .checked()?;
    // A stash holding only untracked files has no patch
    if patch.trim().is_empty() {
        return Ok(());
    }

    // Undo staged changes too when the index agrees with the patch
    let through_index = git(["apply", "--check", "--reverse", "--index"])
        .input(patch.as_str())
        .succeeds();

    let mut apply = git(["apply", "--reverse"]);
    if through_index {
        apply = apply.arg("--index");
    }
    let output = apply.input(patch).output()?;
    if !output.success() {
        log::debug!("reverse apply rejected: {}", output.stderr.trim());
        return Err(GitToolsError::ReverseFailed);
    }
    Ok(())
}

fn remove_untracked_files(reference: StashRef) -> Result<()> {
    let untracked_parent = format!("{reference}^3");
    let has_untracked = git(["rev-parse", "--verify", "--quiet"])
        .arg(&untracked_parent)
        .succeeds();
    if !has_untracked {
        return Ok(());
    }

    let listing = git(["ls-tree", "-r", "-z", "--full-tree", "--name-only"])
        .arg(&untracked_parent)
        .checked()?;
    let files = split_nul(&listing);
    if files.is_empty() {
        return Ok(());
    }

    git(["clean", "--force", "--quiet", "--"])
        .args(&files)
        .checked()?;
    Ok(())
}
