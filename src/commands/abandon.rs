use crate::core::{
    command_init::CommandInit,
    error::Result,
    output::info,
    stash::{self, StashRange, StashRef},
};

/// Drops the stashes in `[start, end)`
///
/// Each drop shifts every older stash down by one, so the entry at `start` is resolved
/// and dropped `end - start` times rather than walking the range.
pub fn execute_abandon(start: i64, end: i64, dry_run: bool, quiet: bool) -> Result<()> {
    CommandInit::require_repo()?;

    let count = stash::stash_count()?;
    let range = StashRange::new(start, end, count)?;
    log::debug!("abandoning {range:?} of {count} stashes");

    if dry_run {
        for index in range.start..range.end {
            let reference = StashRef(index);
            let sha = stash::require(reference)?;
            info(&format!("Would drop refs/{reference} ({sha})"), false);
        }
        return Ok(());
    }

    let target = StashRef(range.start);
    for requested in range.start..range.end {
        let sha = stash::require(target)?;
        stash::drop_stash(target)?;
        info(
            &format!("Dropped refs/{} ({sha})", StashRef(requested)),
            quiet,
        );
    }

    Ok(())
}

/// Splits the positional arguments of `abandon [START] END`
pub fn split_range(values: &[i64]) -> (i64, i64) {
    match values {
        [end] => (0, *end),
        [start, end, ..] => (*start, *end),
        [] => (0, 0),
    }
}
