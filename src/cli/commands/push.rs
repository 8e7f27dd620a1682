use crate::cli::commands::open_repo;
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::cli::SourceArgs;
use crate::repo::Backends;
use crate::sync::PushOptions;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct PushArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Push to all git remotes, or to the listed ones
    #[arg(long, num_args = 0.., value_delimiter = ',', value_name = "REMOTES")]
    pub git: Option<Vec<String>>,

    /// Push to all ssh remotes, or to the listed aliases
    #[arg(long, num_args = 0.., value_delimiter = ',', value_name = "ALIASES")]
    pub ssh: Option<Vec<String>>,

    /// Push with git in forced mode
    #[arg(short, long)]
    pub forced: bool,

    /// Push with rsync in delete mode
    #[arg(short, long)]
    pub del: bool,

    /// Ensure a git push by editing the .gitignore safely
    #[arg(short, long)]
    pub ensure_push: bool,

    /// Log level, 1 and above show the output of git and rsync
    #[arg(short, long, default_value_t = 0)]
    pub log_level: u8,
}

/// Execute the push command
pub fn execute(args: PushArgs) -> Result<()> {
    CliContext::raise_log_level(args.log_level);

    // Without --git and --ssh every enabled remote of both kinds is used
    let (git, ssh) = match (&args.git, &args.ssh) {
        (None, None) => (Some(Vec::new()), Some(Vec::new())),
        (git, ssh) => (git.clone(), ssh.clone()),
    };
    let options = PushOptions {
        forced: args.forced,
        ensure_push: args.ensure_push,
    };

    for source in args.sources.resolve() {
        let repo = open_repo(&source, Backends::sync())?;
        let git_remotes = repo.select_git_remotes(git.as_deref())?;
        let ssh_remotes = repo.select_ssh_remotes(ssh.as_deref())?;

        for remote in &git_remotes {
            output::marker(format!(
                "Pushing {} branch \"{}\" to \"{} {}\" (git).",
                repo.name().bold(),
                remote.branch,
                remote.remote,
                remote.destination
            ));
            repo.git()?.push(remote, options)?;
        }

        for remote in &ssh_remotes {
            output::marker(format!(
                "Pushing {} to {}:{} (ssh).",
                repo.name().bold(),
                remote.alias.bold(),
                remote.destination
            ));
            repo.ssh()?.push(&remote.alias, &remote.destination, args.del)?;
        }

        if git_remotes.is_empty() && ssh_remotes.is_empty() {
            output::warning(format!("No remotes to push {} to.", repo.name()));
        }
    }

    Ok(())
}
