//! Terminal queries, clearing and paging.
//!
//! The pager is whatever git would use (`git var GIT_PAGER`, which honours
//! `GIT_PAGER`, `core.pager` and `PAGER`), started through `sh -c` with `LESS=FRX`
//! unless the user already set `LESS`.

use crate::core::{error::Result, execute::git, output::print_block};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{self, Clear, ClearType},
};
use std::io::{IsTerminal, Write};
use std::process::{Command, Stdio};

pub fn stdout_is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Number of rows of the attached terminal, if there is one
pub fn height() -> Option<usize> {
    terminal::size().ok().map(|(_, rows)| rows as usize)
}

pub fn clear_screen() -> Result<()> {
    let mut stdout = std::io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

/// Whether text of `line_count` lines overflows a terminal of `height` rows
pub fn needs_paging(line_count: usize, height: Option<usize>) -> bool {
    matches!(height, Some(rows) if line_count > rows)
}

fn pager_command() -> Option<String> {
    let (stdout, status) = git(["var", "GIT_PAGER"]).stdout().ok()?;
    let pager = stdout.trim();
    if status != 0 || pager.is_empty() || pager == "cat" {
        return None;
    }
    Some(pager.to_string())
}

/// Prints `text`, through the pager when stdout is a terminal too short to hold it
pub fn print_or_page(text: &str) -> Result<()> {
    if !stdout_is_terminal() || !needs_paging(text.lines().count(), height()) {
        print_block(text)?;
        return Ok(());
    }

    let Some(pager) = pager_command() else {
        print_block(text)?;
        return Ok(());
    };

    log::debug!("paging through {pager}");
    let mut command = Command::new("sh");
    command.args(["-c", &pager]).stdin(Stdio::piped());
    if std::env::var_os("LESS").is_none() {
        command.env("LESS", "FRX");
    }

    let mut child = command.spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        // The user may quit the pager before reading everything
        match stdin.write_all(text.as_bytes()) {
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            other => other?,
        }
    }
    child.wait()?;
    Ok(())
}
