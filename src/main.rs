use clap::{Args, Parser, Subcommand};
use git_tools::commands::*;
use git_tools::core::{
    colors::ColorMode,
    config::ConfigScope,
    error::{GitToolsError, Result},
    print_error,
    templates::SectionFormat,
    usage,
};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "git-tools")]
#[command(about = "Supplementary git subcommands for stashes, state and settings")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop a range of stashes
    Abandon {
        /// Show what would be dropped without dropping anything
        #[arg(short, long, conflicts_with = "quiet")]
        dry_run: bool,
        /// Suppress all non-error output
        #[arg(short, long)]
        quiet: bool,
        /// [START] END: drop stash@{START} up to, not including, stash@{END}
        #[arg(
            value_name = "RANGE",
            required = true,
            num_args = 1..=2,
            allow_negative_numbers = true
        )]
        range: Vec<i64>,
    },
    /// Reverse the changes a stash applied to the working tree
    Restash {
        /// Suppress all non-error output
        #[arg(short, long)]
        quiet: bool,
        /// Stash to reverse (default stash@{0})
        stash: Option<String>,
    },
    /// Stash the working tree and index while leaving them in place
    Snapshot {
        /// Suppress all non-error output
        #[arg(short, long)]
        quiet: bool,
        /// Drop existing stashes with the same message first
        #[arg(long)]
        replace: bool,
        /// Stash message
        message: Option<String>,
        /// Only snapshot these files
        #[arg(last = true)]
        files: Vec<String>,
    },
    /// Stash only the given files, leaving every other change in place
    Tuck {
        /// Suppress all non-error output
        #[arg(short, long)]
        quiet: bool,
        /// Do not abort when deleted files are left out of the tuck
        #[arg(long)]
        ignore_deleted: bool,
        /// Tuck every staged change
        #[arg(long, conflicts_with = "unindexed")]
        indexed: bool,
        /// Tuck every unstaged and untracked change
        #[arg(long)]
        unindexed: bool,
        /// Show what would be tucked without changing anything
        #[arg(short, long, conflicts_with = "quiet")]
        dry_run: bool,
        /// Stash message
        message: Option<String>,
        /// Pathspecs selecting the files to tuck
        #[arg(last = true)]
        files: Vec<String>,
    },
    /// Show a dashboard of the repository's state
    #[command(args_conflicts_with_subcommands = true)]
    State {
        #[command(subcommand)]
        command: Option<StateCommand>,
        #[command(flatten)]
        args: StateArgs,
    },
    /// List, read or remove configuration
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// List the commits on HEAD that a commit-ish does not have
    #[command(args_conflicts_with_subcommands = true)]
    Changes {
        #[command(subcommand)]
        command: Option<ChangesCommand>,
        #[command(flatten)]
        args: ChangesArgs,
    },
    /// Print the upstream branch of a branch
    Upstream {
        /// Prefix the branch with its remote
        #[arg(short = 'r', long, value_enum)]
        include_remote: Option<IncludeRemote>,
        /// Branch to inspect (default: the current branch)
        #[arg(short, long)]
        branch: Option<String>,
    },
    /// Re-stage every staged file with its current content
    Reindex,
    /// Commit the staged changes as a fixup of a commit
    Fixup {
        /// Suppress all non-error output
        #[arg(short, long)]
        quiet: bool,
        /// Commit to fix up (default HEAD)
        commit: Option<String>,
    },
}

#[derive(Args)]
struct StateArgs {
    /// When to color the output
    #[arg(long, value_enum)]
    color: Option<ColorMode>,
    /// Dashboard layout
    #[arg(short, long, value_enum)]
    format: Option<SectionFormat>,
    /// Show the status section
    #[arg(short = 's', long, conflicts_with = "no_show_status")]
    show_status: bool,
    /// Hide the status section
    #[arg(short = 'S', long)]
    no_show_status: bool,
    /// Clear the terminal first
    #[arg(long, conflicts_with = "no_clear")]
    clear: bool,
    #[arg(long)]
    no_clear: bool,
    /// Show only the status section
    #[arg(long)]
    ignore_extensions: bool,
    /// Extensions to show regardless of configuration
    #[arg(short = 'e', long, value_name = "EXTENSION", num_args = 1..)]
    show_extensions: Vec<String>,
    /// Extensions to hide regardless of configuration
    #[arg(short = 'E', long, value_name = "EXTENSION", num_args = 1..)]
    no_show_extensions: Vec<String>,
    /// Extra options for an extension, as NAME=OPTIONS
    #[arg(short, long, value_name = "EXTENSION=OPTIONS", num_args = 1.., allow_hyphen_values = true)]
    options: Vec<String>,
    /// Show sections with nothing to report
    #[arg(long, conflicts_with = "no_show_empty")]
    show_empty: bool,
    #[arg(long)]
    no_show_empty: bool,
    /// Section order
    #[arg(long, value_name = "EXTENSION", num_args = 1..)]
    order: Vec<String>,
}

#[derive(Subcommand)]
enum StateCommand {
    /// List configured extensions and their commands
    Extensions,
}

#[derive(Args)]
#[group(id = "scope", multiple = false)]
struct ScopeArgs {
    /// Use the repository config file
    #[arg(long)]
    local: bool,
    /// Use the per-user config file
    #[arg(long)]
    global: bool,
    /// Use the system-wide config file
    #[arg(long)]
    system: bool,
    /// Use the given config file
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
}

impl ScopeArgs {
    fn scope(self) -> Option<ConfigScope> {
        scope_from_flags(self.local, self.global, self.system, self.file)
    }
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// List configuration, optionally limited to a section
    List {
        /// Dotted section prefix, e.g. git-state.extensions
        section: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Print the number of entries instead
        #[arg(short, long)]
        count: bool,
        /// Output layout
        #[arg(short, long, value_enum)]
        format: Option<ListFormat>,
        /// Print keys only
        #[arg(long, conflicts_with = "sections")]
        keys: bool,
        /// Print section names only
        #[arg(long)]
        sections: bool,
    },
    /// Remove a section from every config file that has it
    Destroy {
        section: String,
        /// Show what would be removed without removing it
        #[arg(short, long)]
        dry_run: bool,
    },
    /// Print the value of a key
    Get {
        key: String,
        /// Printed when the key is not set
        #[arg(long)]
        default: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
    },
}

#[derive(Args)]
#[group(id = "view", multiple = false)]
struct ViewArgs {
    /// Print the number of commits
    #[arg(short, long)]
    count: bool,
    /// Print a diffstat against the merge base
    #[arg(short, long)]
    stat: bool,
    /// Print the diff against the merge base
    #[arg(short, long)]
    diff: bool,
    /// List the commits the commit-ish has that HEAD does not
    #[arg(short, long)]
    inverse: bool,
}

impl ViewArgs {
    fn view(&self) -> ChangesView {
        match (self.count, self.stat, self.diff, self.inverse) {
            (true, ..) => ChangesView::Count,
            (_, true, ..) => ChangesView::Stat,
            (_, _, true, _) => ChangesView::Diff,
            (.., true) => ChangesView::Inverse,
            _ => ChangesView::Log,
        }
    }
}

#[derive(Args)]
struct ChangesArgs {
    #[command(flatten)]
    view: ViewArgs,
    /// Commit-ish to compare with
    commitish: Option<String>,
    /// Limit to these files
    #[arg(last = true)]
    files: Vec<String>,
}

#[derive(Args)]
struct AssociationScopeArgs {
    /// Store in the repository config file (default)
    #[arg(long, conflicts_with = "global")]
    local: bool,
    /// Store in the per-user config file
    #[arg(long)]
    global: bool,
}

impl AssociationScopeArgs {
    fn scope(&self) -> ConfigScope {
        if self.global {
            ConfigScope::Global
        } else {
            ConfigScope::Local
        }
    }
}

#[derive(Subcommand)]
enum ChangesCommand {
    /// Associate the current branch with a commit-ish
    Associate {
        /// Commit-ish to associate with; prints the association when omitted
        commitish: Option<String>,
        /// Associate with the branch's upstream
        #[arg(short, long, conflicts_with = "commitish")]
        upstream: bool,
        #[command(flatten)]
        scope: AssociationScopeArgs,
        /// Suppress all non-error output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Remove branch associations
    Unassociate {
        /// Remove every association
        #[arg(short, long, conflicts_with = "prune")]
        all: bool,
        /// Remove associations of branches that no longer exist
        #[arg(short, long)]
        prune: bool,
        #[command(flatten)]
        scope: AssociationScopeArgs,
        /// Show what would be removed without removing it
        #[arg(short, long)]
        dry_run: bool,
    },
}

/// `Some(true)` for the positive flag, `Some(false)` for its negation, else `None`
fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// The command line, with the subcommand implied by a `git-<command>` program name
fn command_line() -> Vec<OsString> {
    let mut args: Vec<OsString> = env::args_os().collect();
    let implied = args
        .first()
        .and_then(|program| Path::new(program).file_stem())
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.strip_prefix("git-"))
        .filter(|command| *command != "tools")
        .map(OsString::from);

    if let Some(command) = implied {
        args.insert(1.min(args.len()), command);
    }
    args
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Abandon {
            dry_run,
            quiet,
            range,
        } => {
            let (start, end) = split_range(&range);
            execute_abandon(start, end, dry_run, quiet)
        }
        Commands::Restash { quiet, stash } => execute_restash(stash, quiet),
        Commands::Snapshot {
            quiet,
            replace,
            message,
            files,
        } => execute_snapshot(message, files, replace, quiet),
        Commands::Tuck {
            quiet,
            ignore_deleted,
            indexed,
            unindexed,
            dry_run,
            message,
            files,
        } => {
            let selection = match (indexed, unindexed) {
                (true, _) => Some(TuckSelection::Indexed),
                (_, true) => Some(TuckSelection::Unindexed),
                _ => None,
            };
            execute_tuck(TuckOptions {
                message,
                files,
                selection,
                ignore_deleted,
                dry_run,
                quiet,
            })
        }
        Commands::State {
            command: Some(StateCommand::Extensions),
            ..
        } => execute_state_extensions(),
        Commands::State {
            command: None,
            args,
        } => execute_state(StateOptions {
            color: args.color,
            format: args.format,
            show_status: flag_pair(args.show_status, args.no_show_status),
            clear: flag_pair(args.clear, args.no_clear),
            ignore_extensions: args.ignore_extensions,
            show_extensions: args.show_extensions,
            no_show_extensions: args.no_show_extensions,
            options: args.options,
            show_empty: flag_pair(args.show_empty, args.no_show_empty),
            order: args.order,
        }),
        Commands::Settings { command } => match command {
            SettingsCommand::List {
                section,
                scope,
                count,
                format,
                keys,
                sections,
            } => {
                let limit = match (keys, sections) {
                    (true, _) => Some(ListLimit::Keys),
                    (_, true) => Some(ListLimit::Sections),
                    _ => None,
                };
                execute_settings_list(ListOptions {
                    section,
                    scope: scope.scope(),
                    count,
                    format,
                    limit,
                })
            }
            SettingsCommand::Destroy { section, dry_run } => {
                execute_settings_destroy(&section, dry_run)
            }
            SettingsCommand::Get {
                key,
                default,
                scope,
            } => execute_settings_get(&key, default, scope.scope()),
        },
        Commands::Changes {
            command: Some(command),
            ..
        } => match command {
            ChangesCommand::Associate {
                commitish,
                upstream,
                scope,
                quiet,
            } => execute_associate(commitish, upstream, scope.scope(), quiet),
            ChangesCommand::Unassociate {
                all,
                prune,
                scope,
                dry_run,
            } => {
                let target = match (all, prune) {
                    (true, _) => UnassociateTarget::All,
                    (_, true) => UnassociateTarget::Prune,
                    _ => UnassociateTarget::Current,
                };
                execute_unassociate(target, scope.scope(), dry_run)
            }
        },
        Commands::Changes {
            command: None,
            args,
        } => execute_changes(args.commitish, args.view.view(), args.files),
        Commands::Upstream {
            include_remote,
            branch,
        } => execute_upstream(include_remote, branch),
        Commands::Reindex => execute_reindex(),
        Commands::Fixup { quiet, commit } => execute_fixup(commit, quiet),
    }
}

fn main() {
    let cli = Cli::parse_from(command_line());

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Whether to color is decided per command by its Theme
    colored::control::set_override(true);

    if let Err(e) = run(cli.command) {
        match &e {
            GitToolsError::Usage { message } => usage(message),
            _ => print_error(&e.to_string()),
        }
        std::process::exit(e.exit_code());
    }
}
