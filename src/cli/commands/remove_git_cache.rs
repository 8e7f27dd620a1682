use crate::cli::commands::open_repo;
use crate::cli::output;
use crate::cli::SourceArgs;
use crate::repo::Backends;
use anyhow::Result;
use colored::Colorize;

/// Execute the remove-git-cache command
pub fn execute(sources: SourceArgs) -> Result<()> {
    for source in sources.resolve() {
        let repo = open_repo(&source, Backends::sync())?;
        output::marker(format!(
            "Removing the git cache of package {}.",
            repo.name().bold()
        ));
        repo.git()?.remove_cache()?;
    }

    Ok(())
}
