use crate::core::{
    colors::{ColorMode, Theme},
    command_init::CommandInit,
    config,
    error::{GitToolsError, Result},
    extensions::{
        load_extension_configs, split_options, BuiltIn, BuiltInSettings, Extension,
        ExtensionConfig, SectionProvider,
    },
    output::info,
    templates::{render_sections, Section, SectionFormat},
    terminal,
};

/// Command-line choices for the dashboard; `None` falls back to configuration
#[derive(Debug, Clone, Default)]
pub struct StateOptions {
    pub color: Option<ColorMode>,
    pub format: Option<SectionFormat>,
    pub show_status: Option<bool>,
    pub clear: Option<bool>,
    pub ignore_extensions: bool,
    pub show_extensions: Vec<String>,
    pub no_show_extensions: Vec<String>,
    /// `NAME=OPTIONS` overrides
    pub options: Vec<String>,
    pub show_empty: Option<bool>,
    pub order: Vec<String>,
}

/// A provider together with whether it made it onto the dashboard
struct Candidate {
    extension: Extension,
    visible: bool,
}

pub fn execute_state(options: StateOptions) -> Result<()> {
    CommandInit::require_repo()?;

    let color = match options.color {
        Some(color) => color,
        None => config::get_enum("git-state.color")?.unwrap_or_default(),
    };
    let theme = Theme::from_mode(color);
    let format = match options.format {
        Some(format) => format,
        None => config::get_enum("git-state.format")?.unwrap_or_default(),
    };
    let show_empty = match options.show_empty {
        Some(show_empty) => show_empty,
        None => config::get_bool("git-state.show-empty", false)?,
    };
    let clear = match options.clear {
        Some(clear) => clear,
        None => config::get_bool("git-state.clear", true)?,
    };
    let order = if options.order.is_empty() {
        config::get_list("git-state.order")?.unwrap_or_default()
    } else {
        options.order.clone()
    };

    let settings = BuiltInSettings::load()?;
    let configs = load_extension_configs()?;
    let overrides = parse_option_overrides(&options.options)?;

    let candidates = collect_candidates(&options, &configs, &settings);
    let names: Vec<&str> = candidates.iter().map(|c| c.extension.name()).collect();
    let sections: Vec<Section> = resolve_order(&names, &order)
        .into_iter()
        .map(|index| &candidates[index])
        .filter(|candidate| candidate.visible)
        .map(|candidate| {
            let name = candidate.extension.name();
            let extension = match overrides.iter().find(|(n, _)| n == name) {
                Some((_, extra)) => candidate.extension.clone().with_options(split_options(extra)),
                None => candidate.extension.clone(),
            };
            Section::new(extension.title(), extension.accent(), extension.get(&theme))
        })
        .collect();

    let rendered = render_sections(&sections, format, show_empty, &theme);

    if clear && terminal::stdout_is_terminal() {
        terminal::clear_screen()?;
    }
    if !rendered.is_empty() {
        terminal::print_or_page(&rendered)?;
    }
    Ok(())
}

/// `state extensions`: every configured extension with the command it runs
pub fn execute_state_extensions() -> Result<()> {
    CommandInit::require_repo()?;

    for config in load_extension_configs()? {
        let command = match (&config.command, BuiltIn::from_name(&config.name)) {
            (Some(command), _) => command.clone(),
            (None, Some(_)) => "(built-in)".to_string(),
            (None, None) => "(no command)".to_string(),
        };
        info(&format!("{}: {command}", config.name), false);
    }
    Ok(())
}

fn collect_candidates(
    options: &StateOptions,
    configs: &[ExtensionConfig],
    settings: &BuiltInSettings,
) -> Vec<Candidate> {
    let status_config = configs.iter().find(|c| c.name == BuiltIn::Status.name());
    let status = match status_config {
        Some(config) if config.command.is_none() => Extension::from_config(config, settings),
        _ => Extension::built_in(BuiltIn::Status, settings.clone()),
    };
    let status_visible = match options.show_status {
        Some(show) => show,
        None => !options
            .no_show_extensions
            .iter()
            .any(|name| name == BuiltIn::Status.name()),
    };

    let mut candidates = vec![Candidate {
        extension: status,
        visible: status_visible,
    }];
    if options.ignore_extensions {
        return candidates;
    }

    for config in configs.iter().filter(|c| c.name != BuiltIn::Status.name()) {
        candidates.push(Candidate {
            extension: Extension::from_config(config, settings),
            visible: resolve_visibility(
                &config.name,
                config.show,
                &options.show_extensions,
                &options.no_show_extensions,
            ),
        });
    }

    for name in &options.show_extensions {
        if candidates.iter().any(|c| c.extension.name() == name) {
            continue;
        }
        match BuiltIn::from_name(name) {
            Some(kind) => candidates.push(Candidate {
                extension: Extension::built_in(kind, settings.clone()),
                visible: true,
            }),
            None => log::debug!("no extension named {name}"),
        }
    }

    candidates
}

/// Whether an extension is shown: explicit flags, then its `show` setting, then shown
pub fn resolve_visibility(
    name: &str,
    configured: Option<bool>,
    show: &[String],
    no_show: &[String],
) -> bool {
    if show.iter().any(|n| n == name) {
        return true;
    }
    if no_show.iter().any(|n| n == name) {
        return false;
    }
    configured.unwrap_or(true)
}

/// Indices of `names` in display order
///
/// Names listed in `order` come first, in that order; unknown names in `order` are
/// skipped and everything not listed follows in discovery order.
pub fn resolve_order(names: &[&str], order: &[String]) -> Vec<usize> {
    let mut placed = vec![false; names.len()];
    let mut indices = Vec::with_capacity(names.len());

    for wanted in order {
        if let Some(index) = (0..names.len()).find(|&i| !placed[i] && names[i] == wanted.as_str()) {
            placed[index] = true;
            indices.push(index);
        }
    }
    indices.extend((0..names.len()).filter(|i| !placed[*i]));
    indices
}

/// Parses `NAME=OPTIONS` arguments of `--options`
pub fn parse_option_overrides(values: &[String]) -> Result<Vec<(String, String)>> {
    values
        .iter()
        .map(|value| match value.split_once('=') {
            Some((name, options)) if !name.is_empty() => {
                Ok((name.to_string(), options.to_string()))
            }
            _ => Err(GitToolsError::usage(format!(
                "--options expects NAME=OPTIONS, got '{value}'"
            ))),
        })
        .collect()
}
