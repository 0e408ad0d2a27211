use crate::core::{
    command_init::CommandInit,
    error::{GitToolsError, Result},
    execute::git,
    git::{porcelain_status, rebase_pathspec},
    output::{info, warn},
    stash,
};
use std::time::Duration;

const CLOCK_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Saves the working tree and index (optionally only `files`) as a new stash while
/// leaving them exactly as they were
pub fn execute_snapshot(
    message: Option<String>,
    files: Vec<String>,
    replace: bool,
    quiet: bool,
) -> Result<()> {
    let repo = CommandInit::require_commits("snapshot")?;

    if replace && message.is_none() {
        return Err(GitToolsError::usage(
            "--replace requires a message to match existing snapshots against",
        ));
    }

    let prefix = CommandInit::enter_toplevel(&repo)?;
    let files: Vec<String> = files
        .iter()
        .map(|pathspec| rebase_pathspec(&prefix, pathspec))
        .collect();

    if porcelain_status(&files)?.is_empty() {
        info("No local changes to save", quiet);
        return Ok(());
    }

    if replace {
        if let Some(message) = &message {
            drop_matching(message)?;
        }
    }

    wait_for_distinct_second(quiet)?;

    let saved = push_and_reapply(message.as_deref(), &files)?;
    info(saved.trim_end(), quiet);
    Ok(())
}

/// Pushes a stash including untracked files and applies it straight back
///
/// Returns git's "Saved working directory..." line.
pub(crate) fn push_and_reapply(message: Option<&str>, files: &[String]) -> Result<String> {
    let mut push = git(["stash", "push", "--include-untracked"]);
    if let Some(message) = message {
        push = push.args(["--message", message]);
    }
    if !files.is_empty() {
        push = push.arg("--").args(files);
    }
    let saved = push.checked()?;

    git(["stash", "apply", "--index", "--quiet", "stash@{0}"]).checked()?;
    Ok(saved)
}

/// Drops every stash whose message is `message`, oldest first so ordinals stay valid
fn drop_matching(message: &str) -> Result<()> {
    let matching: Vec<_> = stash::stash_entries()?
        .into_iter()
        .filter(|entry| entry.message() == message)
        .collect();

    for entry in matching.iter().rev() {
        log::debug!("replacing {} ({})", entry.reference, entry.subject);
        stash::drop_stash(entry.reference)?;
    }
    Ok(())
}

/// Stash creation times have one-second resolution; two snapshots in the same second
/// cannot be told apart, so wait for the clock to move past the newest stash.
fn wait_for_distinct_second(quiet: bool) -> Result<()> {
    let Some(newest) = stash::newest_timestamp()? else {
        return Ok(());
    };

    let mut warned = false;
    while chrono::Utc::now().timestamp() == newest {
        warned = warn(
            "a stash was created less than a second ago, waiting for the clock to advance",
            quiet,
            warned,
        ) || warned;
        std::thread::sleep(CLOCK_POLL_INTERVAL);
    }
    Ok(())
}
