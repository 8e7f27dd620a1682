use crate::cli::commands::open_repo;
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::cli::SourceArgs;
use crate::repo::Backends;
use anyhow::{anyhow, Result};
use colored::Colorize;
use dialoguer::Confirm;

/// Execute the remove-commit-history command
pub fn execute(sources: SourceArgs) -> Result<()> {
    for source in sources.resolve() {
        let repo = open_repo(&source, Backends::sync())?;

        let branch = repo
            .config()
            .git
            .remotes
            .first()
            .map(|remote| remote.branch.clone())
            .ok_or_else(|| anyhow!("No git remote is defined for {}.", repo.name()))?;

        if !CliContext::is_yes() {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Remove the entire commit history of branch \"{}\" in {}?",
                    branch,
                    repo.name()
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                output::warning("Skipped.");
                continue;
            }
        }

        output::marker(format!(
            "Removing the git commit history of package {}.",
            repo.name().bold()
        ));
        repo.git()?.remove_commit_history(&branch)?;
    }

    Ok(())
}
