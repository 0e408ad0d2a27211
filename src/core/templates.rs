//! Section rendering for the state dashboard.
//!
//! A dashboard is a list of [`Section`]s rendered one after another in either the
//! compact or the pretty layout:
//!
//! ```text
//! compact                 pretty
//! # status (main)         # status (main)
//!  M README.md
//! # stashes                   M README.md
//! stash@{0}: On main: x
//!                         # stashes
//!
//!                             stash@{0}: On main: x
//! ```
//!
//! Sections with an empty body are dropped unless `show_empty` is set, which is how a
//! clean working tree disappears from the dashboard.

use crate::core::colors::Theme;
use clap::ValueEnum;

/// Dashboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SectionFormat {
    #[default]
    Compact,
    Pretty,
}

/// One rendered block of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub accent: Option<String>,
    pub body: String,
}

impl Section {
    pub fn new(title: impl Into<String>, accent: Option<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            accent,
            body: body.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

fn render_header(section: &Section, theme: &Theme) -> String {
    match &section.accent {
        Some(accent) => format!(
            "# {} ({})",
            theme.title(&section.title),
            theme.accent(accent)
        ),
        None => format!("# {}", theme.title(&section.title)),
    }
}

/// Renders one section, always ending in a newline
pub fn render_section(section: &Section, format: SectionFormat, theme: &Theme) -> String {
    let header = render_header(section, theme);
    let body = section.body.trim_end_matches('\n');

    match format {
        SectionFormat::Compact => {
            if body.is_empty() {
                format!("{header}\n")
            } else {
                format!("{header}\n{body}\n")
            }
        }
        SectionFormat::Pretty => {
            let mut rendered = String::with_capacity(header.len() + body.len() * 2);
            rendered.push_str(&header);
            rendered.push_str("\n\n");
            if !body.is_empty() {
                for line in body.lines() {
                    if !line.is_empty() {
                        rendered.push_str("    ");
                        rendered.push_str(line);
                    }
                    rendered.push('\n');
                }
                rendered.push('\n');
            }
            rendered
        }
    }
}

/// Renders every section in order, dropping empty ones unless `show_empty`
///
/// Trailing blank lines are trimmed; an all-empty dashboard renders as `""`.
pub fn render_sections(
    sections: &[Section],
    format: SectionFormat,
    show_empty: bool,
    theme: &Theme,
) -> String {
    let rendered: String = sections
        .iter()
        .filter(|section| show_empty || !section.is_empty())
        .map(|section| render_section(section, format, theme))
        .collect();

    let trimmed = rendered.trim_end_matches('\n');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n")
    }
}
