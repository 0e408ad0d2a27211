//! Common assertion helpers for test output validation
//!
//! Provides predicates for the prefixes and messages every git-tools command shares.

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for the not-a-repository error
pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("error: not a git repository")
}

/// Creates a predicate that checks for an `error:` line with the given message
pub fn error_message(message: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("error: {message}"))
}

/// Creates a predicate that checks for a `usage:` line
pub fn usage_message(message: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("usage: {message}"))
}

/// Creates a predicate that checks for a `Dropped refs/stash@{N} (<sha>)` line
pub fn dropped(index: usize, sha: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Dropped refs/stash@{{{index}}} ({sha})"))
}
