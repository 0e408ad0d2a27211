//! git-tools - supplementary git subcommands for stash bookkeeping, a configurable
//! repository dashboard and a handful of workflow shortcuts.
//!
//! Every command shells out to `git` and reshapes its output; nothing here implements
//! version control itself.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Process execution and git queries
//! - Stash references, ranges and file sets
//! - Typed access to git configuration
//! - Dashboard sections, extensions and themes
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Process execution
    git,
    CommandInit,
    ConfigScope,
    // Configuration
    ConfigValue,
    Extension,
    FileSet,
    // Error handling
    GitToolsError,
    // Git operations
    GitRepo,
    GitStatus,
    ProcessCommand,
    Result,
    // Dashboard
    Section,
    SectionFormat,
    SectionProvider,
    StashRange,
    // Stash bookkeeping
    StashRef,
    StatusEntry,
    Theme,
};
