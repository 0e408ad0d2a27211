use crate::core::{
    command_init::CommandInit,
    config,
    error::Result,
    output::info,
};
use clap::ValueEnum;

/// When `upstream` prefixes the branch with its remote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IncludeRemote {
    Always,
    #[default]
    Never,
    /// Unless the remote is the local repository (`.`)
    NoneLocal,
}

/// Prints the upstream of `branch` (default: the current branch)
///
/// A branch without an upstream prints nothing.
pub fn execute_upstream(include_remote: Option<IncludeRemote>, branch: Option<String>) -> Result<()> {
    let repo = CommandInit::require_repo()?;

    let branch = match branch {
        Some(branch) => branch,
        None => repo.require_branch()?,
    };
    let include_remote = match include_remote {
        Some(include_remote) => include_remote,
        None => config::get_enum("git-upstream.include-remote")?.unwrap_or_default(),
    };

    let Some(merge) = config::get(&format!("branch.{branch}.merge"), None)? else {
        log::debug!("{branch} has no upstream");
        return Ok(());
    };
    let remote = config::get(&format!("branch.{branch}.remote"), None)?.map(|v| v.raw);

    info(
        &format_upstream(merge.as_str(), remote.as_deref(), include_remote),
        false,
    );
    Ok(())
}

pub fn format_upstream(merge: &str, remote: Option<&str>, include_remote: IncludeRemote) -> String {
    let name = merge.strip_prefix("refs/heads/").unwrap_or(merge);
    match (include_remote, remote) {
        (IncludeRemote::Always, Some(remote)) => format!("{remote}/{name}"),
        (IncludeRemote::NoneLocal, Some(remote)) if remote != "." => format!("{remote}/{name}"),
        _ => name.to_string(),
    }
}
