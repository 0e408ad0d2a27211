//! Message formatting for consistent CLI presentation.
//!
//! Every command reports through these helpers so that prefixes and streams stay the
//! same across the whole tool.
//!
//! # Streams
//! - `info`: standard output, suppressed by `--quiet`
//! - `warn`, `usage`, `error`: standard error
//!
//! Termination is never done here. Commands return errors and `main` decides the exit
//! status after printing them with [`print_error`] or [`usage`].

use std::io::Write;

/// Prints an informational line to standard output unless `quiet` is set
pub fn info(message: &str, quiet: bool) {
    if !quiet {
        println!("{message}");
    }
}

/// Prints a `warn:` line to standard error
///
/// Returns `true` when the warning was printed so call sites that loop can warn once:
///
/// ```no_run
/// use git_tools::core::output::warn;
///
/// let mut warned = false;
/// for _ in 0..3 {
///     warned = warn("still waiting", false, warned) || warned;
/// }
/// ```
pub fn warn(message: &str, quiet: bool, ignore: bool) -> bool {
    if quiet || ignore {
        return false;
    }
    eprintln!("warn: {message}");
    true
}

/// Prints a `usage:` line to standard error
pub fn usage(message: &str) {
    eprintln!("usage: {message}");
}

/// Prints an `error:` line to standard error
pub fn print_error(message: &str) {
    eprintln!("error: {message}");
}

/// Writes already formatted text to standard output, adding a final newline if missing
pub fn print_block(text: &str) -> std::io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}
