use crate::cli::commands::open_repo;
use crate::cli::output;
use crate::config::{GitRemote, SshRemote};
use crate::repo::Backends;
use anyhow::Result;
use clap::{ArgGroup, Args};
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("kind").required(true).args(["ssh", "git"])))]
pub struct AddRemoteArgs {
    /// Source directory, defaults to the current working directory
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// ssh remote formatted like <alias>:<destination>
    #[arg(long, value_name = "ALIAS:DESTINATION")]
    pub ssh: Option<String>,

    /// Add a git remote
    #[arg(long)]
    pub git: bool,

    /// Git remote name
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Git remote url
    #[arg(long, required_if_eq("git", "true"))]
    pub destination: Option<String>,

    /// Git branch
    #[arg(long, default_value = "main")]
    pub branch: String,
}

/// Execute the add-remote command
pub fn execute(args: AddRemoteArgs) -> Result<()> {
    let source = args.source.unwrap_or_else(|| PathBuf::from("./"));
    let mut repo = open_repo(&source, Backends::none())?;
    let name = repo.name().to_string();

    let added = if let Some(value) = &args.ssh {
        let remote = SshRemote::parse(value)?;
        output::marker(format!(
            "Adding ssh remote \"{}:{}\" to \"{}\".",
            remote.alias, remote.destination, name
        ));
        repo.config_mut().add_ssh_remote(remote)
    } else {
        let destination = args.destination.unwrap_or_default();
        let remote = GitRemote::new(args.remote, destination, args.branch);
        output::marker(format!(
            "Adding git remote \"{}:{}:{}\" to \"{}\".",
            remote.remote, remote.destination, remote.branch, name
        ));
        repo.config_mut().add_git_remote(remote)
    };

    if added {
        repo.save()?;
    } else {
        output::warning("The remote is already registered.");
    }

    Ok(())
}
