//! Stash references, ranges and the stash queries the workflows share.
//!
//! Stash entries are addressed by ordinal (`stash@{N}`, 0 = newest). Ordinals are only
//! meaningful for the current invocation: every push or drop shifts the entries above
//! it, so callers re-resolve a reference right before using it instead of holding on to
//! a captured list.
//!
//! # Public API
//! - [`StashRef`]: strictly parsed `stash@{N}` reference
//! - [`StashRange`]: validated half-open `[start, end)` ordinal range
//! - [`StashEntry`]: one line of `git stash list`
//! - [`stash_count`], [`stash_entries`], [`resolve`], [`drop_stash`],
//!   [`newest_timestamp`]: thin wrappers over `git stash`/`git rev-parse`

use crate::core::{
    error::{GitToolsError, Result},
    execute::{git, split_lines},
};
use std::fmt;
use std::str::FromStr;

/// A `stash@{N}` ordinal reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StashRef(pub usize);

impl StashRef {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for StashRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stash@{{{}}}", self.0)
    }
}

impl FromStr for StashRef {
    type Err = GitToolsError;

    /// Accepts exactly `stash@{N}` with a non-negative decimal `N`
    fn from_str(s: &str) -> Result<Self> {
        s.strip_prefix("stash@{")
            .and_then(|rest| rest.strip_suffix('}'))
            .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|n| n.parse::<usize>().ok())
            .map(StashRef)
            .ok_or_else(|| GitToolsError::invalid_stash_ref(s))
    }
}

/// A validated `[start, end)` range of stash ordinals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StashRange {
    pub start: usize,
    pub end: usize,
}

impl StashRange {
    /// Validates a requested range against the number of existing stashes
    ///
    /// `end` above the stash count is clamped to it. A `start` above the count is an
    /// error that carries the actual count.
    pub fn new(start: i64, end: i64, count: usize) -> Result<Self> {
        if end < 0 {
            return Err(GitToolsError::NegativeEnd);
        }
        if end < start {
            return Err(GitToolsError::RangeOrder);
        }
        if start < 0 {
            return Err(GitToolsError::NegativeStart);
        }

        let start = start as usize;
        if start > count {
            return Err(GitToolsError::StartTooHigh { count });
        }
        let end = (end as usize).min(count);

        Ok(StashRange { start, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One entry of `git stash list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashEntry {
    pub reference: StashRef,
    /// Reflog subject, e.g. `On main: message` or `WIP on main: abc123 subject`
    pub subject: String,
}

impl StashEntry {
    /// The part of the subject after the `On <branch>: ` prefix
    pub fn message(&self) -> &str {
        self.subject
            .split_once(": ")
            .map(|(_, message)| message)
            .unwrap_or(&self.subject)
    }
}

/// All stash entries, newest first
pub fn stash_entries() -> Result<Vec<StashEntry>> {
    let stdout = git(["stash", "list", "--format=%gs"]).checked()?;
    Ok(split_lines(&stdout)
        .into_iter()
        .enumerate()
        .map(|(index, subject)| StashEntry {
            reference: StashRef(index),
            subject,
        })
        .collect())
}

pub fn stash_count() -> Result<usize> {
    let stdout = git(["stash", "list", "--format=%gd"]).checked()?;
    Ok(split_lines(&stdout).len())
}

/// Commit id the reference currently points at, `None` if it does not resolve
pub fn resolve(reference: StashRef) -> Result<Option<String>> {
    let (stdout, status) = git(["rev-parse", "--verify", "--quiet"])
        .arg(format!("{reference}^{{commit}}"))
        .stdout()?;
    if status != 0 {
        return Ok(None);
    }
    Ok(Some(stdout.trim().to_string()))
}

/// Commit id the reference points at, or an invalid reference error
pub fn require(reference: StashRef) -> Result<String> {
    resolve(reference)?.ok_or_else(|| GitToolsError::invalid_stash_ref(reference.to_string()))
}

pub fn drop_stash(reference: StashRef) -> Result<()> {
    git(["stash", "drop", "--quiet"])
        .arg(reference.to_string())
        .checked()?;
    Ok(())
}

/// Commit time (seconds since the epoch) of the newest stash
pub fn newest_timestamp() -> Result<Option<i64>> {
    let (stdout, status) = git(["log", "-1", "--format=%ct", "refs/stash"]).stdout()?;
    if status != 0 {
        return Ok(None);
    }
    Ok(stdout.trim().parse::<i64>().ok())
}
