//! Type-safe git porcelain status.
//!
//! `git status --porcelain -z` reports every changed path as a two character code
//! (index state, working tree state) followed by the path. This module turns those
//! records into [`StatusEntry`] values so the stash workflows can partition and display
//! them without string matching at every call site.
//!
//! # Public API
//! - [`GitStatus`]: one side (index or working tree) of a porcelain code
//! - [`StatusEntry`]: a parsed porcelain record

use crate::core::error::{GitToolsError, Result};
use std::fmt;

/// One column of a porcelain status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitStatus {
    /// No change (space)
    Unmodified,
    /// Modified file (M)
    Modified,
    /// Added/new file in index (A)
    Added,
    /// Deleted file (D)
    Deleted,
    /// Renamed file (R)
    Renamed,
    /// Copied file (C)
    Copied,
    /// Type changed (T)
    TypeChanged,
    /// Untracked file (?)
    Untracked,
    /// Ignored file (!)
    Ignored,
    /// Unmerged/conflicted file (U)
    Unmerged,
}

impl GitStatus {
    pub fn from_code(code: char) -> Option<GitStatus> {
        let status = match code {
            ' ' => GitStatus::Unmodified,
            'M' => GitStatus::Modified,
            'A' => GitStatus::Added,
            'D' => GitStatus::Deleted,
            'R' => GitStatus::Renamed,
            'C' => GitStatus::Copied,
            'T' => GitStatus::TypeChanged,
            '?' => GitStatus::Untracked,
            '!' => GitStatus::Ignored,
            'U' => GitStatus::Unmerged,
            _ => return None,
        };
        Some(status)
    }

    pub fn as_char(&self) -> char {
        match self {
            GitStatus::Unmodified => ' ',
            GitStatus::Modified => 'M',
            GitStatus::Added => 'A',
            GitStatus::Deleted => 'D',
            GitStatus::Renamed => 'R',
            GitStatus::Copied => 'C',
            GitStatus::TypeChanged => 'T',
            GitStatus::Untracked => '?',
            GitStatus::Ignored => '!',
            GitStatus::Unmerged => 'U',
        }
    }
}

/// A single `git status --porcelain` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub index: GitStatus,
    pub worktree: GitStatus,
    pub path: String,
    /// Source path of a rename or copy
    pub orig_path: Option<String>,
}

impl StatusEntry {
    /// Parses the NUL-delimited output of `git status --porcelain -z`
    pub fn parse_all(output: &str) -> Result<Vec<StatusEntry>> {
        let mut entries = Vec::new();
        let mut records = output.split('\0').filter(|r| !r.is_empty());

        while let Some(record) = records.next() {
            let mut chars = record.chars();
            let (index, worktree) = match (
                chars.next().and_then(GitStatus::from_code),
                chars.next().and_then(GitStatus::from_code),
            ) {
                (Some(index), Some(worktree)) => (index, worktree),
                _ => return Err(malformed(record)),
            };
            let path = record
                .get(3..)
                .filter(|p| !p.is_empty())
                .ok_or_else(|| malformed(record))?
                .to_string();

            // Renames and copies carry their source path as the next record
            let orig_path = if matches!(index, GitStatus::Renamed | GitStatus::Copied)
                || matches!(worktree, GitStatus::Renamed | GitStatus::Copied)
            {
                Some(records.next().ok_or_else(|| malformed(record))?.to_string())
            } else {
                None
            };

            entries.push(StatusEntry {
                index,
                worktree,
                path,
                orig_path,
            });
        }

        Ok(entries)
    }

    pub fn is_untracked(&self) -> bool {
        self.index == GitStatus::Untracked
    }

    /// Whether the index differs from HEAD for this path
    pub fn is_staged(&self) -> bool {
        !matches!(
            self.index,
            GitStatus::Unmodified | GitStatus::Untracked | GitStatus::Ignored
        )
    }

    /// All paths this record touches (the source of a rename included)
    pub fn paths(&self) -> Vec<&str> {
        let mut paths = vec![self.path.as_str()];
        if let Some(orig) = &self.orig_path {
            paths.push(orig.as_str());
        }
        paths
    }

    pub fn code(&self) -> String {
        format!("{}{}", self.index.as_char(), self.worktree.as_char())
    }
}

impl fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.orig_path {
            Some(orig) => write!(f, "{} {} -> {}", self.code(), orig, self.path),
            None => write!(f, "{} {}", self.code(), self.path),
        }
    }
}

fn malformed(record: &str) -> GitToolsError {
    GitToolsError::command_failed(
        "git status --porcelain",
        format!("unexpected status record '{record}'"),
    )
}
