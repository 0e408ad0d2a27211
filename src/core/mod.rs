//! Core functionality for the git-tools commands.
//!
//! This module provides the building blocks every command shares: running git,
//! reading configuration, stash bookkeeping, dashboard rendering and error handling.

pub mod colors;
pub mod command_init;
pub mod config;
pub mod error;
pub mod execute;
pub mod extensions;
pub mod file_set;
pub mod git;
pub mod git_status;
pub mod output;
pub mod stash;
pub mod templates;
pub mod terminal;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{GitToolsError, Result};

// === Process execution ===
// Every git invocation goes through this builder
pub use execute::{git, ProcessCommand, ProcessOutput};

// === Git operations ===
// Repository discovery and shared path listings
pub use git::GitRepo;

// === Git status types ===
// Type-safe porcelain status codes and records
pub use git_status::{GitStatus, StatusEntry};

// === Stash bookkeeping ===
pub use file_set::FileSet;
pub use stash::{StashEntry, StashRange, StashRef};

// === Configuration ===
pub use config::{ConfigScope, ConfigValue};

// === Command initialization ===
pub use command_init::CommandInit;

// === Dashboard ===
// Section providers and their rendering
pub use colors::{ColorMode, Theme};
pub use extensions::{BuiltIn, Extension, SectionProvider};
pub use templates::{render_section, render_sections, Section, SectionFormat};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{info, print_error, usage, warn};
