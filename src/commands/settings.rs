use crate::core::{
    colors::{ColorMode, Theme},
    command_init::CommandInit,
    config::{self, ConfigScope},
    error::{GitToolsError, Result},
    git::GitRepo,
    output::info,
};
use clap::ValueEnum;
use std::collections::BTreeMap;

/// Layout of `settings list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListFormat {
    #[default]
    Compact,
    Pretty,
}

/// Restricts `settings list` to one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLimit {
    Keys,
    Sections,
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub section: Option<String>,
    pub scope: Option<ConfigScope>,
    pub count: bool,
    pub format: Option<ListFormat>,
    pub limit: Option<ListLimit>,
}

/// The scope selected by `--local`, `--global`, `--system` or `--file`
pub fn scope_from_flags(
    local: bool,
    global: bool,
    system: bool,
    file: Option<std::path::PathBuf>,
) -> Option<ConfigScope> {
    match (local, global, system, file) {
        (_, _, _, Some(path)) => Some(ConfigScope::File(path)),
        (true, _, _, None) => Some(ConfigScope::Local),
        (_, true, _, None) => Some(ConfigScope::Global),
        (_, _, true, None) => Some(ConfigScope::System),
        _ => None,
    }
}

fn check_scope(scope: Option<&ConfigScope>) -> Result<()> {
    match scope {
        Some(ConfigScope::Local) => {
            CommandInit::require_repo()?;
        }
        Some(ConfigScope::File(path)) if !path.exists() => {
            return Err(GitToolsError::file_not_found(path.clone()));
        }
        _ => {}
    }
    Ok(())
}

pub fn execute_settings_list(options: ListOptions) -> Result<()> {
    check_scope(options.scope.as_ref())?;

    let format = match options.format {
        Some(format) => format,
        None => config::get_enum("git-settings.list.format")?.unwrap_or_default(),
    };

    let entries = config::list_entries(options.scope.as_ref())?;
    let entries = match &options.section {
        Some(section) => filter_section(entries, section),
        None => entries,
    };

    let theme = Theme::from_mode(ColorMode::Auto);
    let rendered = render_listing(&entries, format, options.limit, options.count, &theme);
    if !rendered.is_empty() {
        info(&rendered, false);
    }
    Ok(())
}

/// Removes `section` from every scope that has it
pub fn execute_settings_destroy(section: &str, dry_run: bool) -> Result<()> {
    let mut scopes = Vec::new();
    if GitRepo::is_inside() {
        scopes.push(ConfigScope::Local);
    }
    scopes.push(ConfigScope::Global);
    scopes.push(ConfigScope::System);

    for scope in scopes {
        let entries = config::list_entries(Some(&scope))?;
        if !has_section(&entries, section) {
            log::debug!("{scope} config has no {section} section");
            continue;
        }

        if dry_run {
            let listing = render_compact(&section_entries(entries, section));
            info(&listing, false);
        } else {
            config::remove_section(section, &scope)?;
        }
    }
    Ok(())
}

/// Prints the value of `key`, or `default` when it is not set anywhere
pub fn execute_settings_get(
    key: &str,
    default: Option<String>,
    scope: Option<ConfigScope>,
) -> Result<()> {
    check_scope(scope.as_ref())?;

    let value = config::get(key, scope.as_ref())?
        .map(|value| value.raw)
        .or(default);
    if let Some(value) = value {
        info(&value, false);
    }
    Ok(())
}

/// Entries whose key lies under the dotted `section` prefix
pub fn filter_section(entries: Vec<(String, String)>, section: &str) -> Vec<(String, String)> {
    let prefix = format!("{section}.");
    entries
        .into_iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .collect()
}

/// Entries `git config --remove-section` would delete: those directly in `section`
pub fn section_entries(entries: Vec<(String, String)>, section: &str) -> Vec<(String, String)> {
    entries
        .into_iter()
        .filter(|(key, _)| section_of(key).eq_ignore_ascii_case(section))
        .collect()
}

/// Whether some key belongs to exactly this section (not only to a subsection of it)
pub fn has_section(entries: &[(String, String)], section: &str) -> bool {
    entries
        .iter()
        .any(|(key, _)| section_of(key).eq_ignore_ascii_case(section))
}

/// The key minus its last segment
fn section_of(key: &str) -> &str {
    key.rsplit_once('.').map(|(section, _)| section).unwrap_or(key)
}

fn name_of(key: &str) -> &str {
    key.rsplit_once('.').map(|(_, name)| name).unwrap_or(key)
}

pub fn render_listing(
    entries: &[(String, String)],
    format: ListFormat,
    limit: Option<ListLimit>,
    count: bool,
    theme: &Theme,
) -> String {
    let lines: Vec<String> = match limit {
        Some(ListLimit::Keys) => entries.iter().map(|(key, _)| key.clone()).collect(),
        Some(ListLimit::Sections) => unique_sections(entries),
        None => entries
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect(),
    };

    if count {
        return lines.len().to_string();
    }
    match (format, limit) {
        (ListFormat::Pretty, None) => render_pretty(entries, theme),
        _ => lines.join("\n"),
    }
}

pub fn render_compact(entries: &[(String, String)]) -> String {
    entries
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn unique_sections(entries: &[(String, String)]) -> Vec<String> {
    let mut sections: Vec<String> = Vec::new();
    for (key, _) in entries {
        let section = section_of(key);
        if !sections.iter().any(|s| s == section) {
            sections.push(section.to_string());
        }
    }
    sections
}

/// `[section "subsection"]` blocks, groups in descending order and keys ascending
pub fn render_pretty(entries: &[(String, String)], theme: &Theme) -> String {
    let mut groups: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();
    for (key, value) in entries {
        groups
            .entry(section_of(key))
            .or_default()
            .push((name_of(key), value.as_str()));
    }

    let mut lines = Vec::new();
    for (section, mut keys) in groups.into_iter().rev() {
        keys.sort();
        lines.push(theme.header(&section_header(section)));
        lines.extend(keys.iter().map(|(name, value)| format!("    {name} = {value}")));
    }
    lines.join("\n")
}

fn section_header(section: &str) -> String {
    match section.split_once('.') {
        Some((first, rest)) => format!("[{first} \"{rest}\"]"),
        None => format!("[{section}]"),
    }
}
