//! Dashboard extensions: the providers behind each `git state` section.
//!
//! Every section comes from a [`SectionProvider`]. The built-in providers (`status`,
//! `log`, `reflog`, `branches`, `stashes`) compute their body from git directly; a
//! user-configured extension runs an arbitrary command. Both are variants of
//! [`Extension`].
//!
//! Extensions are configured under `git-state.extensions.<name>`:
//!
//! ```text
//! [git-state "extensions.todo"]
//!     command = grep -rn TODO src
//!     name = todos
//!     options = --count
//!     show = true
//!     color = false
//! ```

use crate::core::{
    colors::Theme,
    config::{self, ConfigValue},
    error::Result,
    execute::{git, split_lines, ProcessCommand},
    git::GitRepo,
};

pub const EXTENSIONS_PREFIX: &str = "git-state.extensions.";

/// A source of one dashboard section
pub trait SectionProvider {
    /// Name used by `--order`, `--show-extensions` and `--options`
    fn name(&self) -> &str;
    fn title(&self) -> String;
    fn accent(&self) -> Option<String>;
    /// The section body; failures degrade to an empty body
    fn get(&self, theme: &Theme) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltIn {
    Status,
    Log,
    Reflog,
    Branches,
    Stashes,
}

impl BuiltIn {
    pub fn from_name(name: &str) -> Option<BuiltIn> {
        match name {
            "status" => Some(BuiltIn::Status),
            "log" => Some(BuiltIn::Log),
            "reflog" => Some(BuiltIn::Reflog),
            "branches" => Some(BuiltIn::Branches),
            "stashes" => Some(BuiltIn::Stashes),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltIn::Status => "status",
            BuiltIn::Log => "log",
            BuiltIn::Reflog => "reflog",
            BuiltIn::Branches => "branches",
            BuiltIn::Stashes => "stashes",
        }
    }
}

/// Raw `git-state.extensions.<name>.*` settings of one extension
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionConfig {
    pub name: String,
    pub command: Option<String>,
    pub title: Option<String>,
    pub options: Option<String>,
    pub show: Option<bool>,
    pub color: bool,
}

/// Settings the built-in providers read once per dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltInSettings {
    pub show_clean_message: bool,
    pub default_branch: String,
    pub show_only_default: bool,
}

impl BuiltInSettings {
    pub fn load() -> Result<Self> {
        Ok(Self {
            show_clean_message: config::get_bool("git-state.status.show-clean-message", true)?,
            default_branch: config::get_string("git-state.branches.default", "master")?,
            show_only_default: config::get_bool("git-state.branches.show-only-default", false)?,
        })
    }
}

impl Default for BuiltInSettings {
    fn default() -> Self {
        Self {
            show_clean_message: true,
            default_branch: "master".to_string(),
            show_only_default: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    BuiltIn {
        kind: BuiltIn,
        title: Option<String>,
        options: Vec<String>,
        settings: BuiltInSettings,
    },
    Command {
        name: String,
        title: Option<String>,
        command: String,
        options: Vec<String>,
        color: bool,
    },
}

/// Splits an option string the way a shell would, dropping it if unbalanced
pub fn split_options(options: &str) -> Vec<String> {
    shlex::split(options).unwrap_or_else(|| {
        log::debug!("ignoring unparsable options: {options}");
        Vec::new()
    })
}

impl Extension {
    pub fn built_in(kind: BuiltIn, settings: BuiltInSettings) -> Self {
        Extension::BuiltIn {
            kind,
            title: None,
            options: Vec::new(),
            settings,
        }
    }

    /// Builds the provider for a configured extension
    ///
    /// A name matching a built-in without its own `command` is the built-in.
    pub fn from_config(config: &ExtensionConfig, settings: &BuiltInSettings) -> Self {
        let options = config
            .options
            .as_deref()
            .map(split_options)
            .unwrap_or_default();

        match (&config.command, BuiltIn::from_name(&config.name)) {
            (None, Some(kind)) => Extension::BuiltIn {
                kind,
                title: config.title.clone(),
                options,
                settings: settings.clone(),
            },
            (command, _) => Extension::Command {
                name: config.name.clone(),
                title: config.title.clone(),
                command: command.clone().unwrap_or_default(),
                options,
                color: config.color,
            },
        }
    }

    /// Replaces the configured extra options (`--options NAME=OPTS`)
    pub fn with_options(mut self, new_options: Vec<String>) -> Self {
        match &mut self {
            Extension::BuiltIn { options, .. } | Extension::Command { options, .. } => {
                *options = new_options;
            }
        }
        self
    }
}

impl SectionProvider for Extension {
    fn name(&self) -> &str {
        match self {
            Extension::BuiltIn { kind, .. } => kind.name(),
            Extension::Command { name, .. } => name,
        }
    }

    fn title(&self) -> String {
        match self {
            Extension::BuiltIn { title, kind, .. } => {
                title.clone().unwrap_or_else(|| kind.name().to_string())
            }
            Extension::Command { title, name, .. } => title.clone().unwrap_or_else(|| name.clone()),
        }
    }

    fn accent(&self) -> Option<String> {
        match self {
            Extension::BuiltIn {
                kind: BuiltIn::Status,
                ..
            } => status_accent(),
            _ => None,
        }
    }

    fn get(&self, theme: &Theme) -> String {
        match self {
            Extension::BuiltIn {
                kind,
                options,
                settings,
                ..
            } => built_in_body(*kind, options, settings, theme),
            Extension::Command {
                name,
                command,
                options,
                color,
                ..
            } => command_body(name, command, options, *color, theme),
        }
    }
}

/// Current branch, with its upstream when it has one (`main...origin/main`)
fn status_accent() -> Option<String> {
    let repo = GitRepo::current().ok()?;
    match repo.current_branch().ok()? {
        Some(branch) => match repo.upstream_of(&branch).ok().flatten() {
            Some(upstream) => Some(format!("{branch}...{upstream}")),
            None => Some(branch),
        },
        None => {
            let sha = repo.head_short_sha().ok().flatten()?;
            Some(format!("HEAD detached at {sha}"))
        }
    }
}

fn stdout_or_empty(command: ProcessCommand) -> String {
    match command.output() {
        Ok(output) if output.success() => output.stdout.trim_end().to_string(),
        Ok(output) => {
            log::debug!(
                "{} exited with {}: {}",
                command.display(),
                output.status,
                output.stderr.trim()
            );
            String::new()
        }
        Err(e) => {
            log::debug!("{} could not run: {e}", command.display());
            String::new()
        }
    }
}

fn built_in_body(
    kind: BuiltIn,
    options: &[String],
    settings: &BuiltInSettings,
    theme: &Theme,
) -> String {
    match kind {
        BuiltIn::Status => {
            let color = if theme.enabled() { "always" } else { "never" };
            let body = stdout_or_empty(
                git(["-c", format!("color.status={color}").as_str(), "status", "--short"])
                    .arg("--untracked-files=all")
                    .args(options),
            );
            if body.is_empty() && settings.show_clean_message {
                "nothing to commit, working tree clean".to_string()
            } else {
                body
            }
        }
        BuiltIn::Log => stdout_or_empty(
            git(["log", "--oneline", "-n", "10", theme.git_color_flag()]).args(options),
        ),
        BuiltIn::Reflog => stdout_or_empty(
            git(["reflog", "-n", "10", theme.git_color_flag()]).args(options),
        ),
        BuiltIn::Branches => {
            let branches = stdout_or_empty(git([
                "for-each-ref",
                "--format=%(refname:short)",
                "refs/heads",
            ]));
            let names = split_lines(&branches);
            let only_default = names.len() == 1 && names[0] == settings.default_branch;
            if names.is_empty() || (only_default && !settings.show_only_default) {
                return String::new();
            }
            stdout_or_empty(git(["branch", "-vv", theme.git_color_flag()]).args(options))
        }
        BuiltIn::Stashes => {
            stdout_or_empty(git(["stash", "list", theme.git_color_flag()]).args(options))
        }
    }
}

fn command_body(name: &str, command: &str, options: &[String], color: bool, theme: &Theme) -> String {
    let Some(argv) = shlex::split(command).filter(|argv| !argv.is_empty()) else {
        log::debug!("extension {name} has no runnable command");
        return String::new();
    };

    let mut process = ProcessCommand::new(&argv[0]).args(&argv[1..]).args(options);
    if color {
        process = process.arg(theme.git_color_flag());
    }
    stdout_or_empty(process)
}

/// Parses `git-state.extensions.*` settings into one config per extension name
///
/// Extensions keep the order in which their first key appears.
pub fn parse_extension_configs(entries: &[(String, String)]) -> Result<Vec<ExtensionConfig>> {
    let mut configs: Vec<ExtensionConfig> = Vec::new();

    for (key, value) in entries {
        let Some(rest) = key.strip_prefix(EXTENSIONS_PREFIX) else {
            continue;
        };
        let Some((name, field)) = rest.rsplit_once('.') else {
            continue;
        };

        let position = match configs.iter().position(|c| c.name == name) {
            Some(position) => position,
            None => {
                configs.push(ExtensionConfig {
                    name: name.to_string(),
                    ..ExtensionConfig::default()
                });
                configs.len() - 1
            }
        };
        let config = &mut configs[position];

        let raw = ConfigValue::new(key.as_str(), value.as_str());
        match field {
            "command" => config.command = Some(value.clone()),
            "name" => config.title = Some(value.clone()),
            "options" => config.options = Some(value.clone()),
            "show" => config.show = Some(raw.as_bool()?),
            "color" => config.color = raw.as_bool()?,
            other => log::debug!("ignoring unknown extension setting {name}.{other}"),
        }
    }

    Ok(configs)
}

/// Every configured extension, in configuration order
pub fn load_extension_configs() -> Result<Vec<ExtensionConfig>> {
    let entries = config::get_regexp(r"^git-state\.extensions\.", None)?;
    parse_extension_configs(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_groups_by_name_in_discovery_order() -> Result<()> {
        let configs = parse_extension_configs(&entries(&[
            ("git-state.extensions.todo.command", "grep -rn TODO"),
            ("git-state.extensions.log.show", "false"),
            ("git-state.extensions.todo.name", "todos"),
            ("git-state.extensions.todo.color", "yes"),
            ("git-state.order", "log todo"),
        ]))?;

        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].name, "todo");
        assert_eq!(configs[0].command.as_deref(), Some("grep -rn TODO"));
        assert_eq!(configs[0].title.as_deref(), Some("todos"));
        assert!(configs[0].color);
        assert_eq!(configs[1].name, "log");
        assert_eq!(configs[1].show, Some(false));
        Ok(())
    }

    #[test]
    fn test_parse_rejects_non_boolean_show() {
        let result = parse_extension_configs(&entries(&[(
            "git-state.extensions.todo.show",
            "sometimes",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_config_prefers_built_in_without_command() {
        let config = ExtensionConfig {
            name: "stashes".to_string(),
            options: Some("--date=relative".to_string()),
            ..ExtensionConfig::default()
        };
        let extension = Extension::from_config(&config, &BuiltInSettings::default());
        assert!(matches!(
            extension,
            Extension::BuiltIn {
                kind: BuiltIn::Stashes,
                ..
            }
        ));
        assert_eq!(extension.name(), "stashes");
        assert_eq!(extension.title(), "stashes");
    }

    #[test]
    fn test_from_config_command_overrides_built_in_name() {
        let config = ExtensionConfig {
            name: "log".to_string(),
            command: Some("git log --graph".to_string()),
            title: Some("graph".to_string()),
            ..ExtensionConfig::default()
        };
        let extension = Extension::from_config(&config, &BuiltInSettings::default());
        assert!(matches!(extension, Extension::Command { .. }));
        assert_eq!(extension.title(), "graph");
        assert_eq!(extension.accent(), None);
    }

    #[test]
    fn test_command_extension_output_and_options() {
        let extension = Extension::Command {
            name: "echo".to_string(),
            title: None,
            command: "echo 'hello world'".to_string(),
            options: vec!["again".to_string()],
            color: false,
        };
        assert_eq!(extension.get(&Theme::plain()), "hello world again");

        let colored = Extension::Command {
            name: "echo".to_string(),
            title: None,
            command: "echo 'hello world'".to_string(),
            options: vec!["ignored".to_string()],
            color: true,
        }
        .with_options(Vec::new());
        assert_eq!(colored.get(&Theme::plain()), "hello world --color=never");
    }

    #[test]
    fn test_failing_command_degrades_to_empty() {
        let extension = Extension::Command {
            name: "broken".to_string(),
            title: None,
            command: "sh -c 'echo partial; exit 3'".to_string(),
            options: Vec::new(),
            color: false,
        };
        assert_eq!(extension.get(&Theme::plain()), "");

        let missing = Extension::Command {
            name: "missing".to_string(),
            title: None,
            command: "definitely-not-a-real-program-xyz".to_string(),
            options: Vec::new(),
            color: false,
        };
        assert_eq!(missing.get(&Theme::plain()), "");
    }

    #[test]
    fn test_split_options() {
        assert_eq!(split_options("-n 3 --format='%h %s'"), vec!["-n", "3", "--format=%h %s"]);
        assert!(split_options("'unbalanced").is_empty());
    }
}
