use crate::cli::commands::open_repo;
use crate::cli::output;
use crate::cli::SourceArgs;
use crate::repo::Backends;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;

#[derive(Args, Debug)]
pub struct RemotesArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Only show the git remotes
    #[arg(long)]
    pub git: bool,

    /// Only show the ssh remotes
    #[arg(long)]
    pub ssh: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the remotes command
pub fn execute(args: RemotesArgs) -> Result<()> {
    let both = !args.git && !args.ssh;
    let mut listings = Vec::new();

    for source in args.sources.resolve() {
        let repo = open_repo(&source, Backends::none())?;
        let config = repo.config();

        if args.json {
            let mut entry = json!({ "name": repo.name(), "source": repo.source() });
            if args.git || both {
                entry["git"] = json!(config.git.remotes);
            }
            if args.ssh || both {
                entry["ssh"] = json!(config.ssh.remotes);
            }
            listings.push(entry);
            continue;
        }

        println!("{}:", repo.name().bold());
        if args.git || both {
            for remote in &config.git.remotes {
                output::item(format!(
                    "{} {}:{} (git)",
                    remote.branch, remote.remote, remote.destination
                ));
            }
        }
        if args.ssh || both {
            for remote in &config.ssh.remotes {
                output::item(format!("{}:{} (ssh)", remote.alias, remote.destination));
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
    }

    Ok(())
}
