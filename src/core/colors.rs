//! Color handling threaded through rendering as a value.
//!
//! A [`Theme`] is built once per command from the `--color` choice and passed to every
//! function that renders text. Nothing reads a global color switch: `main` tells
//! `colored` to always emit escapes, and a theme only asks for them when enabled.
//!
//! # Color Scheme
//! - **Section titles**: bold
//! - **Accents** (branch names): cyan
//! - **Setting headers**: yellow

use clap::ValueEnum;
use colored::*;
use std::io::IsTerminal;

/// `--color` choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    Always,
    Never,
    #[default]
    Auto,
}

impl ColorMode {
    /// Whether color should be emitted; `auto` follows stdout being a terminal
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    enabled: bool,
}

impl Theme {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn from_mode(mode: ColorMode) -> Self {
        Self::new(mode.enabled())
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Value for a `--color=` flag passed on to git and extension commands
    pub fn git_color_flag(&self) -> &'static str {
        if self.enabled {
            "--color=always"
        } else {
            "--color=never"
        }
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan())
    }

    pub fn header(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow())
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.enabled {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}
