use crate::core::{
    colors::{ColorMode, Theme},
    command_init::CommandInit,
    config::{self, ConfigScope},
    error::{GitToolsError, Result},
    execute::{git, split_lines},
    git::GitRepo,
    output::info,
    terminal,
};

const ASSOCIATIONS_PREFIX: &str = "git-changes.associations.";
const DEFAULT_COMMITISH: &str = "refs/heads/master";

/// What `changes` reports about the commits between HEAD and the commit-ish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangesView {
    #[default]
    Log,
    Inverse,
    Count,
    Stat,
    Diff,
}

fn association_key(branch: &str) -> String {
    format!("{ASSOCIATIONS_PREFIX}{branch}.with")
}

/// Branch named by an association key, if `key` is one
pub fn association_branch(key: &str) -> Option<&str> {
    key.strip_prefix(ASSOCIATIONS_PREFIX)?.strip_suffix(".with")
}

/// Lists the commits on HEAD that `commitish` does not have
pub fn execute_changes(
    commitish: Option<String>,
    view: ChangesView,
    files: Vec<String>,
) -> Result<()> {
    let repo = CommandInit::require_commits("list changes")?;

    let commitish = match commitish {
        Some(commitish) => commitish,
        None => default_commitish(&repo)?,
    };
    validate_commitish(&commitish)?;
    log::debug!("changes against {commitish} ({view:?})");

    let theme = Theme::from_mode(ColorMode::Auto);
    let command = match view {
        ChangesView::Log => git(["log", "--oneline", theme.git_color_flag()])
            .arg(format!("{commitish}..HEAD")),
        ChangesView::Inverse => git(["log", "--oneline", theme.git_color_flag()])
            .arg(format!("HEAD..{commitish}")),
        ChangesView::Count => git(["rev-list", "--count"]).arg(format!("{commitish}..HEAD")),
        ChangesView::Stat | ChangesView::Diff => {
            let base = git(["merge-base", commitish.as_str(), "HEAD"]).checked()?;
            let flag = if view == ChangesView::Stat { "--stat" } else { "--patch" };
            git(["diff", flag, theme.git_color_flag(), base.trim(), "HEAD"])
        }
    };

    let output = command.arg("--").args(&files).checked()?;
    if !output.is_empty() {
        terminal::print_or_page(&output)?;
    }
    Ok(())
}

/// The branch's association, else `git-changes.default-commit-ish`, else master
fn default_commitish(repo: &GitRepo) -> Result<String> {
    if let Some(branch) = repo.current_branch()? {
        if let Some(value) = config::get(&association_key(&branch), None)? {
            return Ok(value.raw);
        }
    }
    config::get_string("git-changes.default-commit-ish", DEFAULT_COMMITISH)
}

/// Rejects names that are not commits or that match more than one ref
fn validate_commitish(commitish: &str) -> Result<()> {
    let resolves = git(["rev-parse", "--verify", "--quiet"])
        .arg(format!("{commitish}^{{commit}}"))
        .succeeds();
    if !resolves {
        return Err(GitToolsError::invalid_commitish(commitish));
    }

    let (listing, _) = git(["show-ref", commitish]).stdout()?;
    let refs = matching_refs(&listing);
    if refs.len() > 1 {
        return Err(GitToolsError::AmbiguousRef {
            name: commitish.to_string(),
            refs,
        });
    }
    Ok(())
}

/// Ref names from `git show-ref` output
pub fn matching_refs(listing: &str) -> Vec<String> {
    split_lines(listing)
        .iter()
        .filter_map(|line| line.split_once(' ').map(|(_, name)| name.to_string()))
        .collect()
}

/// Records (or, with neither argument, prints) what the current branch is compared with
pub fn execute_associate(
    commitish: Option<String>,
    upstream: bool,
    scope: ConfigScope,
    quiet: bool,
) -> Result<()> {
    let repo = CommandInit::require_repo()?;
    let branch = repo.require_branch()?;
    let key = association_key(&branch);

    let commitish = match (commitish, upstream) {
        (Some(commitish), _) => commitish,
        (None, true) => repo
            .upstream_of(&branch)?
            .ok_or_else(|| GitToolsError::NoUpstream {
                branch: branch.clone(),
            })?,
        (None, false) => {
            if let Some(value) = config::get(&key, None)? {
                info(&value.raw, false);
            }
            return Ok(());
        }
    };

    validate_commitish(&commitish)?;
    config::set(&key, &commitish, Some(&scope))?;
    info(&format!("{branch} has been associated with {commitish}"), quiet);
    Ok(())
}

/// Which associations `changes unassociate` removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnassociateTarget {
    #[default]
    Current,
    All,
    Prune,
}

pub fn execute_unassociate(
    target: UnassociateTarget,
    scope: ConfigScope,
    dry_run: bool,
) -> Result<()> {
    let repo = CommandInit::require_repo()?;

    let associations: Vec<(String, String)> = config::list_entries(Some(&scope))?
        .into_iter()
        .filter_map(|(key, value)| association_branch(&key).map(|b| (b.to_string(), value)))
        .collect();

    let selected: Vec<(String, String)> = match target {
        UnassociateTarget::Current => {
            let branch = repo.require_branch()?;
            associations
                .into_iter()
                .filter(|(b, _)| *b == branch)
                .collect()
        }
        UnassociateTarget::All => associations,
        UnassociateTarget::Prune => associations
            .into_iter()
            .filter(|(b, _)| !repo.branch_exists(b))
            .collect(),
    };

    for (branch, commitish) in selected {
        if dry_run {
            info(&format!("Would unassociate {branch} from {commitish}"), false);
        } else {
            config::unset(&association_key(&branch), Some(&scope))?;
            log::debug!("unassociated {branch} from {commitish}");
        }
    }
    Ok(())
}
