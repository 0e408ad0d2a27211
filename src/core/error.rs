//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitToolsError`] which covers every way a git-tools command can
//! fail. It uses `thiserror` for the definitions and offers small constructors for the
//! variants that carry data.
//!
//! # Public API
//! - [`GitToolsError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitToolsError>`
//!
//! # Error Categories
//! - **Preconditions**: not a repository, empty repository, missing files
//! - **Validation**: bad stash ranges, bad stash references, bad config values
//! - **External tool**: git commands that failed or were rejected
//! - **Usage**: argument combinations only detectable at runtime

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-tools
#[derive(Error, Debug)]
pub enum GitToolsError {
    // Repository preconditions
    #[error("not a git repository")]
    NotInGitRepo,

    #[error("cannot {operation} in an empty repository")]
    EmptyRepository { operation: String },

    #[error("git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("{path} does not exist")]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // External commands
    #[error("{command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    // Usage errors are printed with a `usage:` prefix
    #[error("{message}")]
    Usage { message: String },

    // Stash ranges
    #[error("start cannot be negative")]
    NegativeStart,

    #[error("end cannot be negative")]
    NegativeEnd,

    #[error("end of range cannot come before the start")]
    RangeOrder,

    #[error("start too high\nerror: only {count} {} exist", stash_noun(.count))]
    StartTooHigh { count: usize },

    // Stash references
    #[error("no stashes exist")]
    NoStashes,

    #[error("{reference} is not a valid stash reference")]
    InvalidStashRef { reference: String },

    #[error("unable to reverse modifications")]
    ReverseFailed,

    #[error("no files to tuck")]
    NoFilesToTuck,

    // Refs
    #[error("{name} is not a valid commit-ish")]
    InvalidCommitish { name: String },

    #[error("{name} is ambiguous:\n{}", indent_refs(.refs))]
    AmbiguousRef { name: String, refs: Vec<String> },

    #[error("not on a branch")]
    DetachedHead,

    #[error("{branch} has no upstream")]
    NoUpstream { branch: String },

    #[error("nothing staged to fix up")]
    NothingStaged,

    // Configuration
    #[error("invalid value for {key}: '{value}' is not a valid {expected}")]
    InvalidConfigValue {
        key: String,
        value: String,
        expected: String,
    },
}

fn stash_noun(count: &usize) -> &'static str {
    if *count == 1 {
        "stash"
    } else {
        "stashes"
    }
}

fn indent_refs(refs: &[String]) -> String {
    refs.iter()
        .map(|r| format!("  {r}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convenience type alias for Results using GitToolsError
pub type Result<T> = std::result::Result<T, GitToolsError>;

impl GitToolsError {
    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create an empty repository error for the named operation
    pub fn empty_repository(operation: impl Into<String>) -> Self {
        Self::EmptyRepository {
            operation: operation.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a failed command error
    pub fn command_failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Create an invalid stash reference error
    pub fn invalid_stash_ref(reference: impl Into<String>) -> Self {
        Self::InvalidStashRef {
            reference: reference.into(),
        }
    }

    /// Create an invalid commit-ish error
    pub fn invalid_commitish(name: impl Into<String>) -> Self {
        Self::InvalidCommitish { name: name.into() }
    }

    /// Create an invalid config value error
    pub fn invalid_config_value(
        key: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidConfigValue {
            key: key.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } => 2,
            _ => 1,
        }
    }
}
