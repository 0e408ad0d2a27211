//! Typed access to git configuration.
//!
//! All settings are stored by git itself; this module reads them through `git config`
//! and converts raw strings with [`ConfigValue`] so call sites never parse booleans or
//! lists by hand.
//!
//! # Public API
//! - [`ConfigScope`]: system, global, local or an explicit file
//! - [`ConfigValue`]: raw value with `as_bool`, `as_list` and `as_enum`
//! - [`get`], [`get_bool`], [`get_list`], [`get_enum`]: single key lookups
//! - [`list_entries`]: every `key=value` pair of a scope, NUL-safe
//! - [`set`], [`unset`], [`remove_section`], [`get_regexp`]: mutations and pattern queries

use crate::core::{
    error::{GitToolsError, Result},
    execute::{git, ProcessCommand},
};
use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

/// Which configuration file a read or write targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigScope {
    System,
    Global,
    Local,
    File(PathBuf),
}

impl ConfigScope {
    /// Arguments selecting this scope on a `git config` command line
    pub fn args(&self) -> Vec<String> {
        match self {
            ConfigScope::System => vec!["--system".to_string()],
            ConfigScope::Global => vec!["--global".to_string()],
            ConfigScope::Local => vec!["--local".to_string()],
            ConfigScope::File(path) => vec!["--file".to_string(), path.display().to_string()],
        }
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigScope::System => write!(f, "system"),
            ConfigScope::Global => write!(f, "global"),
            ConfigScope::Local => write!(f, "local"),
            ConfigScope::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

/// A raw configuration value together with the key it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    pub key: String,
    pub raw: String,
}

impl ConfigValue {
    pub fn new(key: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw: raw.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Git boolean: true/yes/on/1 and false/no/off/0/empty, case-insensitive
    pub fn as_bool(&self) -> Result<bool> {
        match self.raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" | "" => Ok(false),
            _ => Err(GitToolsError::invalid_config_value(
                &self.key, &self.raw, "boolean",
            )),
        }
    }

    /// Items separated by whitespace or commas
    pub fn as_list(&self) -> Vec<String> {
        self.raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// One of the values of a clap enum, case-insensitive
    pub fn as_enum<T: ValueEnum>(&self) -> Result<T> {
        T::from_str(self.raw.trim(), true).map_err(|_| {
            let expected = T::value_variants()
                .iter()
                .filter_map(|v| v.to_possible_value())
                .map(|v| v.get_name().to_string())
                .collect::<Vec<_>>()
                .join("|");
            GitToolsError::invalid_config_value(&self.key, &self.raw, expected)
        })
    }
}

fn config_command(scope: Option<&ConfigScope>) -> ProcessCommand {
    let command = git(["config"]);
    match scope {
        Some(scope) => command.args(scope.args()),
        None => command,
    }
}

/// Value of `key` in the given scope, or in git's unscoped precedence order
pub fn get(key: &str, scope: Option<&ConfigScope>) -> Result<Option<ConfigValue>> {
    let (stdout, status) = config_command(scope).args(["--get", key]).stdout()?;
    if status != 0 {
        return Ok(None);
    }
    let value = stdout.strip_suffix('\n').unwrap_or(&stdout);
    Ok(Some(ConfigValue::new(key, value)))
}

pub fn get_string(key: &str, default: &str) -> Result<String> {
    Ok(get(key, None)?
        .map(|v| v.raw)
        .unwrap_or_else(|| default.to_string()))
}

pub fn get_bool(key: &str, default: bool) -> Result<bool> {
    match get(key, None)? {
        Some(value) => value.as_bool(),
        None => Ok(default),
    }
}

pub fn get_list(key: &str) -> Result<Option<Vec<String>>> {
    Ok(get(key, None)?.map(|v| v.as_list()))
}

pub fn get_enum<T: ValueEnum>(key: &str) -> Result<Option<T>> {
    get(key, None)?.map(|v| v.as_enum()).transpose()
}

/// Every `(key, value)` pair of a scope in file order
///
/// Uses `--null` so values containing newlines survive intact.
pub fn list_entries(scope: Option<&ConfigScope>) -> Result<Vec<(String, String)>> {
    let (stdout, status) = config_command(scope).args(["--list", "--null"]).stdout()?;
    // A missing global or system file lists nothing and exits non-zero
    if status != 0 {
        return Ok(Vec::new());
    }
    Ok(parse_null_listing(&stdout))
}

/// Parses `key\nvalue\0` records; a key without a newline has no value
pub fn parse_null_listing(output: &str) -> Vec<(String, String)> {
    output
        .split('\0')
        .filter(|record| !record.is_empty())
        .map(|record| match record.split_once('\n') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (record.to_string(), String::new()),
        })
        .collect()
}

/// `(key, value)` pairs whose key matches the regular expression
pub fn get_regexp(pattern: &str, scope: Option<&ConfigScope>) -> Result<Vec<(String, String)>> {
    let (stdout, status) = config_command(scope)
        .args(["--null", "--get-regexp", pattern])
        .stdout()?;
    // Exit status 1: nothing matched
    if status != 0 {
        return Ok(Vec::new());
    }
    Ok(parse_null_listing(&stdout))
}

pub fn set(key: &str, value: &str, scope: Option<&ConfigScope>) -> Result<()> {
    config_command(scope).args([key, value]).checked()?;
    Ok(())
}

pub fn unset(key: &str, scope: Option<&ConfigScope>) -> Result<()> {
    config_command(scope).args(["--unset", key]).checked()?;
    Ok(())
}

pub fn remove_section(section: &str, scope: &ConfigScope) -> Result<()> {
    config_command(Some(scope))
        .args(["--remove-section", section])
        .checked()?;
    Ok(())
}
