use crate::cli::commands::open_repo;
use crate::cli::output;
use crate::cli::SourceArgs;
use crate::core::error::VrepoError;
use crate::repo::Backends;
use anyhow::Result;
use clap::{ArgGroup, Args};
use colored::Colorize;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("remote").required(true).args(["git", "ssh"])))]
pub struct PullArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Pull from this git remote
    #[arg(long, value_name = "REMOTE")]
    pub git: Option<String>,

    /// Pull from this ssh alias
    #[arg(long, value_name = "ALIAS")]
    pub ssh: Option<String>,

    /// Pull with git in forced mode
    #[arg(short, long)]
    pub forced: bool,

    /// Pull with rsync in delete mode
    #[arg(short, long)]
    pub del: bool,
}

/// Execute the pull command
pub fn execute(args: PullArgs) -> Result<()> {
    for source in args.sources.resolve() {
        let repo = open_repo(&source, Backends::sync())?;

        if let Some(name) = &args.git {
            let remote = repo
                .config()
                .find_git_remote(name)
                .ok_or_else(|| VrepoError::git_remote_not_found(name.as_str()))?;
            output::marker(format!(
                "Pulling {} branch \"{}\" from \"{}\" \"{}\" (git).",
                repo.name().bold(),
                remote.branch,
                remote.remote,
                remote.destination
            ));
            repo.git()?.pull(remote, args.forced)?;
        } else if let Some(alias) = &args.ssh {
            let remote = repo
                .config()
                .find_ssh_remote(alias)
                .ok_or_else(|| VrepoError::ssh_remote_not_found(alias.as_str()))?;
            output::marker(format!(
                "Pulling {} from {}:{} (ssh).",
                repo.name().bold(),
                remote.alias.bold(),
                remote.destination
            ));
            repo.ssh()?.pull(&remote.alias, &remote.destination, args.del)?;
        }
    }

    Ok(())
}
