//! Command-line interface for vrepo

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

pub mod commands;
pub mod context;
pub mod output;

use commands::{
    add_remote::AddRemoteArgs, check_ignore::CheckIgnoreArgs, list_large_files::ListLargeFilesArgs,
    pull::PullArgs, push::PushArgs, remotes::RemotesArgs,
};
use context::CliContext;

/// vrepo - keep a source directory in sync with its remotes
#[derive(Parser)]
#[command(
    name = "vrepo",
    version,
    about = "Push and pull a source directory to git remotes and ssh hosts, publish npm packages",
    long_about = "vrepo keeps a source directory synchronized with its git remotes and ssh (rsync) targets, \
                  publishes npm packages and inspects large files with optional .gitignore filtering. \
                  Remotes are stored per directory in a .vrepo file."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable progress spinners
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Auto-answer yes to all prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Source directories a command operates on
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Source directory, defaults to the current working directory
    #[arg(long, conflicts_with = "sources")]
    pub source: Option<PathBuf>,

    /// Several source directories, comma separated
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub sources: Vec<PathBuf>,
}

impl SourceArgs {
    /// `--source`, else `--sources`, else the current directory
    pub fn resolve(&self) -> Vec<PathBuf> {
        if let Some(source) = &self.source {
            vec![source.clone()]
        } else if !self.sources.is_empty() {
            self.sources.clone()
        } else {
            vec![PathBuf::from("./")]
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Push the source to one or multiple remotes
    #[command(after_help = "Example: vrepo push --git origin --ssh myserver,backup --del --forced")]
    Push(PushArgs),

    /// Pull the source from a single remote
    #[command(after_help = "Example: vrepo pull --ssh myserver --del")]
    Pull(PullArgs),

    /// Publish the npm package and bump its version
    #[command(alias = "publish-npm")]
    Publish {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Register a git or ssh remote in .vrepo
    #[command(after_help = "Examples:\n  vrepo add-remote --ssh myalias:./destination\n  \
                            vrepo add-remote --git --remote origin --destination git@github.com:user/project.git --branch main")]
    AddRemote(AddRemoteArgs),

    /// List the registered remotes
    Remotes(RemotesArgs),

    /// Squash the git history of the first remote's branch into one commit
    RemoveCommitHistory {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Untrack all files so the .gitignore applies again
    RemoveGitCache {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// List the largest files, optionally filtered by .gitignore
    #[command(after_help = "Example: vrepo list-large-files --gitignore --limit 10")]
    ListLargeFiles(ListLargeFilesArgs),

    /// Check paths against the source's .gitignore
    CheckIgnore(CheckIgnoreArgs),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Requested verbosity: `--verbose` counts as level 1, `push --log-level` may go higher
    pub fn log_level(&self) -> u8 {
        let command_level = match &self.command {
            Commands::Push(args) => args.log_level,
            _ => 0,
        };
        if self.verbose {
            command_level.max(1)
        } else {
            command_level
        }
    }

    /// Execute the parsed command
    pub fn run(self) -> Result<()> {
        CliContext::set(CliContext {
            verbose: self.verbose,
            quiet: self.quiet,
            yes: self.yes,
            no_progress: self.no_progress,
            log_level: self.log_level(),
        });

        match self.command {
            Commands::Push(args) => commands::push::execute(args),
            Commands::Pull(args) => commands::pull::execute(args),
            Commands::Publish { sources } => commands::publish::execute(sources),
            Commands::AddRemote(args) => commands::add_remote::execute(args),
            Commands::Remotes(args) => commands::remotes::execute(args),
            Commands::RemoveCommitHistory { sources } => {
                commands::remove_commit_history::execute(sources)
            },
            Commands::RemoveGitCache { sources } => commands::remove_git_cache::execute(sources),
            Commands::ListLargeFiles(args) => commands::list_large_files::execute(args),
            Commands::CheckIgnore(args) => commands::check_ignore::execute(args),
            Commands::Completion { shell } => commands::completion::execute(shell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_source_resolution() {
        let cli = Cli::try_parse_from(["vrepo", "remotes", "--sources", "a,b"]).unwrap();
        let Commands::Remotes(args) = cli.command else {
            panic!("expected remotes");
        };
        assert_eq!(args.sources.resolve(), vec![PathBuf::from("a"), PathBuf::from("b")]);

        assert_eq!(SourceArgs::default().resolve(), vec![PathBuf::from("./")]);
    }

    #[test]
    fn test_push_remote_lists() {
        let cli = Cli::try_parse_from(["vrepo", "push", "--git", "--ssh", "srv,backup", "-f"]).unwrap();
        let Commands::Push(args) = cli.command else {
            panic!("expected push");
        };
        assert_eq!(args.git, Some(vec![]));
        assert_eq!(args.ssh, Some(vec!["srv".to_string(), "backup".to_string()]));
        assert!(args.forced);
    }

    #[test]
    fn test_log_level_from_flags() {
        let cli = Cli::try_parse_from(["vrepo", "push", "--log-level", "2"]).unwrap();
        assert_eq!(cli.log_level(), 2);

        let cli = Cli::try_parse_from(["vrepo", "--verbose", "remotes"]).unwrap();
        assert_eq!(cli.log_level(), 1);

        let cli = Cli::try_parse_from(["vrepo", "push"]).unwrap();
        assert_eq!(cli.log_level(), 0);
    }

    #[test]
    fn test_publish_npm_alias() {
        let cli = Cli::try_parse_from(["vrepo", "publish-npm"]).unwrap();
        assert!(matches!(cli.command, Commands::Publish { .. }));
    }

    #[test]
    fn test_pull_requires_single_remote() {
        assert!(Cli::try_parse_from(["vrepo", "pull"]).is_err());
        assert!(Cli::try_parse_from(["vrepo", "pull", "--git", "origin", "--ssh", "srv"]).is_err());
        assert!(Cli::try_parse_from(["vrepo", "pull", "--ssh", "srv"]).is_ok());
    }
}
