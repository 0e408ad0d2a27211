//! Process executor used by every command.
//!
//! [`ProcessCommand`] is a small builder around [`std::process::Command`] that runs a
//! child synchronously in the current working directory, optionally feeding text to its
//! standard input. A non-zero exit status is not an error at this layer; callers read the
//! status and output and decide. [`ProcessCommand::checked`] is the one variant that turns
//! a failure into [`GitToolsError::CommandFailed`].

use crate::core::error::{GitToolsError, Result};
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::process::{Command, Stdio};

/// Captured result of a finished child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: i32,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// An external command ready to be executed
#[derive(Debug, Clone)]
pub struct ProcessCommand {
    program: OsString,
    args: Vec<OsString>,
    input: Option<String>,
}

/// Shorthand for a `git` invocation with the given arguments
pub fn git<I, S>(args: I) -> ProcessCommand
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    ProcessCommand::new("git").args(args)
}

impl ProcessCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            input: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Text written to the child's standard input
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Human readable form of the command line, used in logs and error messages
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the command and captures stdout, stderr and the exit status
    pub fn output(&self) -> Result<ProcessOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if self.input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let mut child = cmd.spawn()?;
        if let Some(input) = &self.input {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(input.as_bytes())?;
            }
        }
        let output = child.wait_with_output()?;

        // Killed by a signal: no code, report as a generic failure
        let status = output.status.code().unwrap_or(-1);
        log::debug!("{} -> {}", self.display(), status);

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status,
        })
    }

    /// Runs the command and returns its stdout and exit status, discarding stderr
    pub fn stdout(&self) -> Result<(String, i32)> {
        let output = self.output()?;
        Ok((output.stdout, output.status))
    }

    /// Runs the command and returns stdout, failing on a non-zero exit status
    pub fn checked(&self) -> Result<String> {
        let output = self.output()?;
        if !output.success() {
            return Err(GitToolsError::command_failed(
                self.display(),
                output.stderr.trim(),
            ));
        }
        Ok(output.stdout)
    }

    /// Runs the command and reports whether it exited with status 0
    pub fn succeeds(&self) -> bool {
        self.output().map(|o| o.success()).unwrap_or(false)
    }
}

/// Splits NUL-delimited output (`-z` style) into its non-empty records
pub fn split_nul(text: &str) -> Vec<String> {
    text.split('\0')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits newline-delimited output into its non-empty lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
