use crate::commands::snapshot::push_and_reapply;
use crate::core::{
    command_init::CommandInit,
    error::{GitToolsError, Result},
    execute::git,
    file_set::FileSet,
    git::{
        deleted_files, porcelain_status, rebase_pathspec, staged_files, unstaged_files,
        untracked_files,
    },
    git_status::StatusEntry,
    output::info,
    stash::{self, StashRef},
};

/// Which changes to tuck when no pathspec is given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuckSelection {
    Indexed,
    Unindexed,
}

#[derive(Debug, Clone, Default)]
pub struct TuckOptions {
    pub message: Option<String>,
    pub files: Vec<String>,
    pub selection: Option<TuckSelection>,
    pub ignore_deleted: bool,
    pub dry_run: bool,
    pub quiet: bool,
}

/// Stashes only the selected files, leaving every other change in place
pub fn execute_tuck(options: TuckOptions) -> Result<()> {
    let repo = CommandInit::require_commits("tuck")?;
    let prefix = CommandInit::enter_toplevel(&repo)?;
    let pathspecs: Vec<String> = options
        .files
        .iter()
        .map(|pathspec| rebase_pathspec(&prefix, pathspec))
        .collect();

    let files = resolve_files(&pathspecs, options.selection)?;

    let deleted = deleted_files()?;
    let unaccounted = unaccounted_deletions(&deleted, &files);
    if !unaccounted.is_empty() && !options.ignore_deleted {
        return Err(GitToolsError::usage(format!(
            "deleted files exist in working tree and must be specified explicitly or bypassed with --ignore-deleted:\n{}",
            unaccounted
                .iter()
                .map(|path| format!("    {path}"))
                .collect::<Vec<_>>()
                .join("\n")
        )));
    }

    if files.is_empty() {
        return Err(GitToolsError::NoFilesToTuck);
    }

    let status = porcelain_status(&[])?;
    if options.dry_run {
        let (tucked, kept) = partition_status(&status, &files);
        info(&render_dry_run(&tucked, &kept), false);
        return Ok(());
    }

    tuck_files(&files, &status, options.message.as_deref())?;

    let sha = stash::require(StashRef(0))?;
    info(
        &format!(
            "Tucked {} file{} into {} ({sha})",
            files.len(),
            if files.len() == 1 { "" } else { "s" },
            StashRef(0)
        ),
        options.quiet,
    );
    Ok(())
}

/// Resolves pathspecs (or the selection flag) into the concrete set of changed paths
pub fn resolve_files(files: &[String], selection: Option<TuckSelection>) -> Result<FileSet> {
    let mut resolved = FileSet::new();
    match (files.is_empty(), selection) {
        (false, Some(_)) => {
            return Err(GitToolsError::usage(
                "--indexed and --unindexed cannot be combined with files",
            ));
        }
        (false, None) => {
            resolved.extend(staged_files(files)?);
            resolved.extend(unstaged_files(files)?);
            resolved.extend(untracked_files(files)?);
        }
        (true, Some(TuckSelection::Indexed)) => {
            resolved.extend(staged_files(&[])?);
        }
        (true, Some(TuckSelection::Unindexed)) => {
            resolved.extend(unstaged_files(&[])?);
            resolved.extend(untracked_files(&[])?);
        }
        (true, None) => {
            return Err(GitToolsError::usage(
                "specify files to tuck or use --indexed or --unindexed",
            ));
        }
    }
    Ok(resolved)
}

/// Deleted paths that the resolved set does not name
pub fn unaccounted_deletions(deleted: &[String], files: &FileSet) -> Vec<String> {
    deleted
        .iter()
        .filter(|path| !files.contains(path))
        .cloned()
        .collect()
}

/// Splits status records into those touching `files` and the rest
pub fn partition_status<'a>(
    status: &'a [StatusEntry],
    files: &FileSet,
) -> (Vec<&'a StatusEntry>, Vec<&'a StatusEntry>) {
    status
        .iter()
        .partition(|entry| entry.paths().iter().any(|path| files.contains(path)))
}

pub fn render_dry_run(tucked: &[&StatusEntry], kept: &[&StatusEntry]) -> String {
    fn block(entries: &[&StatusEntry], placeholder: &str) -> String {
        if entries.is_empty() {
            return format!("    {placeholder}");
        }
        entries
            .iter()
            .map(|entry| format!("    {entry}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    format!(
        "Would tuck:\n\n{}\n\nLeaving working directory:\n\n{}\n",
        block(tucked, "nothing"),
        block(kept, "clean")
    )
}

/// The tuck sequence:
///
/// 1. snapshot everything (push + apply) so the full state is saved as `stash@{0}`
/// 2. discard every change outside `files`
/// 3. stash what is left, the tucked entry becomes `stash@{0}`
/// 4. pop the full snapshot (now `stash@{1}`) back onto the clean tree
/// 5. discard `files` so they only live in the tucked entry
fn tuck_files(files: &FileSet, status: &[StatusEntry], message: Option<&str>) -> Result<()> {
    let (_, others) = partition_status(status, files);
    let other_paths: FileSet = others
        .iter()
        .flat_map(|entry| entry.paths())
        .map(str::to_string)
        .collect();

    push_and_reapply(None, &[])?;
    discard_paths(&other_paths.to_vec())?;

    let mut push = git(["stash", "push", "--include-untracked", "--quiet"]);
    if let Some(message) = message {
        push = push.args(["--message", message]);
    }
    push.checked()?;

    git(["stash", "pop", "--index", "--quiet", "stash@{1}"]).checked()?;
    discard_paths(&files.to_vec())?;
    Ok(())
}

/// Returns `paths` to their HEAD state in both the index and the working tree
fn discard_paths(paths: &[String]) -> Result<()> {
    if paths.is_empty() {
        return Ok(());
    }

    let staged: Vec<String> = porcelain_status(paths)?
        .iter()
        .filter(|entry| entry.is_staged())
        .flat_map(|entry| entry.paths())
        .map(str::to_string)
        .collect();
    if !staged.is_empty() {
        git(["reset", "--quiet", "--"]).args(&staged).checked()?;
    }

    let mut tracked = Vec::new();
    let mut untracked = Vec::new();
    for entry in porcelain_status(paths)? {
        if entry.is_untracked() {
            untracked.push(entry.path);
        } else {
            tracked.push(entry.path);
        }
    }
    if !tracked.is_empty() {
        git(["checkout", "--quiet", "--"]).args(&tracked).checked()?;
    }
    if !untracked.is_empty() {
        git(["clean", "--force", "--quiet", "--"])
            .args(&untracked)
            .checked()?;
    }
    Ok(())
}
